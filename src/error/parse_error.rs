use thiserror::Error;

use crate::{ast::Position, error::ErrorKind};

/// Represents all errors that can occur during lexing or parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The lexer met a character that starts no token.
    #[error("Illegal character '{character}'")]
    UnrecognizedCharacter {
        /// The offending character.
        character: char,
        /// Where it was found.
        position:  Position,
    },
    /// An integer literal does not fit in 64 bits.
    #[error("Integer literal {literal} is too large")]
    LiteralTooLarge {
        /// The literal as written.
        literal:  String,
        /// Where it was found.
        position: Position,
    },
    /// Found a token that cannot extend any valid production.
    #[error("Unexpected token {token}")]
    UnexpectedToken {
        /// The token encountered.
        token:    String,
        /// Where it was found.
        position: Position,
    },
    /// A specific token was required but another one was found.
    #[error("Expected {expected}, found {found}")]
    Expected {
        /// Description of what was required.
        expected: &'static str,
        /// The token actually found.
        found:    String,
        /// Where it was found.
        position: Position,
    },
    /// Reached the end of input unexpectedly.
    #[error("Unexpected end of file")]
    UnexpectedEndOfInput {
        /// The end of the source text.
        position: Position,
    },
    /// The left side of `=` is neither a name nor an indexed name.
    #[error("Cannot assign to {target}")]
    InvalidAssignmentTarget {
        /// Description of the rejected target.
        target:   &'static str,
        /// Position of the target.
        position: Position,
    },
    /// Tried to bind a reserved identifier.
    #[error("Identifier {name} is reserved")]
    IdentifierReserved {
        /// The reserved identifier name.
        name:     String,
        /// Where it was bound.
        position: Position,
    },
    /// Expressions or blocks are nested deeper than the parser allows.
    #[error("Nesting exceeds the limit of {limit} levels")]
    NestingTooDeep {
        /// The nesting limit.
        limit:    usize,
        /// Where the limit was crossed.
        position: Position,
    },
    /// The same parameter name appears twice in one function definition.
    #[error("Duplicate parameter {name} in definition of {function}")]
    DuplicateParameter {
        /// The repeated parameter.
        name:     String,
        /// The function being defined.
        function: String,
        /// Position of the definition.
        position: Position,
    },
}

impl ParseError {
    /// The category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnrecognizedCharacter { .. } | Self::LiteralTooLarge { .. } => ErrorKind::Parse,
            Self::UnexpectedToken { .. }
            | Self::Expected { .. }
            | Self::UnexpectedEndOfInput { .. }
            | Self::NestingTooDeep { .. } => ErrorKind::Syntax,
            Self::InvalidAssignmentTarget { .. }
            | Self::IdentifierReserved { .. }
            | Self::DuplicateParameter { .. } => ErrorKind::Lexical,
        }
    }

    /// Where in the source the error was detected.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::UnrecognizedCharacter { position, .. }
            | Self::LiteralTooLarge { position, .. }
            | Self::UnexpectedToken { position, .. }
            | Self::Expected { position, .. }
            | Self::UnexpectedEndOfInput { position }
            | Self::NestingTooDeep { position, .. }
            | Self::InvalidAssignmentTarget { position, .. }
            | Self::IdentifierReserved { position, .. }
            | Self::DuplicateParameter { position, .. } => *position,
        }
    }

    /// Pins an end-of-input error to `end`.
    ///
    /// The parser reports running out of tokens without knowing where the
    /// source ends; the caller that owns the source fills the position in.
    /// Other errors are returned unchanged.
    ///
    /// # Example
    /// ```
    /// use foolang::{ast::Position, error::ParseError};
    ///
    /// let error = ParseError::UnexpectedEndOfInput { position: Position::default() };
    /// let error = error.at_end_of_input(Position::new(4, 9));
    /// assert_eq!(error.position(), Position::new(4, 9));
    /// ```
    #[must_use]
    pub fn at_end_of_input(self, end: Position) -> Self {
        match self {
            Self::UnexpectedEndOfInput { .. } => Self::UnexpectedEndOfInput { position: end },
            other => other,
        }
    }
}
