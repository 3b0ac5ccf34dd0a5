/// Parsing errors.
///
/// Defines all error types that can occur while tokenizing source text and
/// building the syntax tree: illegal characters, unexpected tokens, and
/// structurally invalid constructs such as assigning to a literal.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while executing a program,
/// such as unbound names, type mismatches, division by zero or bad indices.
pub mod runtime_error;
/// Caret diagnostics.
///
/// Renders an [`Error`] together with the offending source line and a `^`
/// under the reported column.
pub mod diagnostic;

use std::fmt;

use thiserror::Error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

use crate::ast::Position;

/// The category an error belongs to.
///
/// The category decides the heading of the rendered diagnostic, e.g.
/// `Syntax error at line 3: ...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The lexer could not make sense of the input.
    Parse,
    /// A token could not extend any valid production.
    Syntax,
    /// The program parsed but is structurally invalid.
    Lexical,
    /// A name is not bound in any reachable scope.
    Lookup,
    /// A well-formed program performed an invalid operation.
    Runtime,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heading = match self {
            Self::Parse => "Parse error",
            Self::Syntax => "Syntax error",
            Self::Lexical => "Lexical error",
            Self::Lookup => "Lookup error",
            Self::Runtime => "Runtime error",
        };
        write!(f, "{heading}")
    }
}

/// Any error produced while parsing or running a program.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Tokenizing or parsing failed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Execution failed.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// The category of this error.
    ///
    /// # Example
    /// ```
    /// use foolang::{error::ErrorKind, evaluate};
    ///
    /// let error = evaluate("1 / 0;").unwrap_err();
    /// assert_eq!(error.kind(), ErrorKind::Runtime);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse(e) => e.kind(),
            Self::Runtime(e) => e.kind(),
        }
    }

    /// Where in the source the error was detected.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Parse(e) => e.position(),
            Self::Runtime(e) => e.position(),
        }
    }

    /// Renders the error as a caret diagnostic against `source`.
    ///
    /// See [`diagnostic::render`].
    #[must_use]
    pub fn render(&self, source: &str) -> String {
        diagnostic::render(self, source)
    }
}
