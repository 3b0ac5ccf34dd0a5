use std::fmt;

use logos::Logos;
use tracing::{trace, warn};

use crate::{ast::Position, error::ParseError};

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
#[logos(error = LexFault)]
pub enum Token {
    /// Float literal tokens, such as `3.14` or `2.0`. Tried before integers so
    /// `2.5` is a single token.
    #[regex(r"[0-9]+\.[0-9]+", parse_float)]
    Float(f64),
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// Double-quoted string literals with escapes decoded, such as `"a\tb"`.
    #[regex(r#""([^"\\\n]|\\.)*""#, parse_string)]
    String(String),
    /// `True` or `False`.
    #[token("True", |_| true)]
    #[token("False", |_| false)]
    Boolean(bool),
    /// `function`
    #[token("function")]
    Function,
    /// `return`
    #[token("return")]
    Return,
    /// `while`
    #[token("while")]
    While,
    /// `print`
    #[token("print")]
    Print,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `and`
    #[token("and")]
    And,
    /// `or`
    #[token("or")]
    Or,
    /// `not`
    #[token("not")]
    Not,
    /// Identifier tokens; variable or function names such as `x` or `square`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `=`
    #[token("=")]
    Equals,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `!`
    #[token("!")]
    Bang,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `//`
    #[token("//")]
    SlashSlash,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `^`
    #[token("^")]
    Caret,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `,`
    #[token(",")]
    Comma,
    /// `;`
    #[token(";")]
    Semicolon,

    /// Newlines only advance the line counter.
    #[token("\n", newline)]
    NewLine,
    /// Spaces, tabs and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Float(x) => return write!(f, "float {x}"),
            Self::Integer(n) => return write!(f, "integer {n}"),
            Self::String(s) => return write!(f, "string {s:?}"),
            Self::Boolean(true) => "True",
            Self::Boolean(false) => "False",
            Self::Identifier(name) => return write!(f, "identifier {name}"),
            Self::Function => "function",
            Self::Return => "return",
            Self::While => "while",
            Self::Print => "print",
            Self::If => "if",
            Self::Else => "else",
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
            Self::Equals => "=",
            Self::EqualEqual => "==",
            Self::BangEqual => "!=",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::Bang => "!",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::SlashSlash => "//",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Caret => "^",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::Comma => ",",
            Self::Semicolon => ";",
            Self::NewLine => "newline",
            Self::Ignored => "whitespace",
        };
        write!(f, "'{symbol}'")
    }
}

/// Failures raised from inside the lexer.
///
/// Logos reports unrecognized input through the default variant; callbacks
/// use the others. They are turned into a positioned [`ParseError`] by
/// [`tokenize`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LexFault {
    /// No token starts at this character.
    #[default]
    UnrecognizedCharacter,
    /// An integer literal that does not fit in an `i64`.
    IntegerTooLarge,
}

impl LexFault {
    fn into_error(self, slice: &str, position: Position) -> ParseError {
        match self {
            Self::UnrecognizedCharacter => {
                ParseError::UnrecognizedCharacter { character: slice.chars().next().unwrap_or('\0'),
                                                    position }
            },
            Self::IntegerTooLarge => ParseError::LiteralTooLarge { literal: slice.to_string(),
                                                                   position },
        }
    }
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line and the byte offset at which it starts, so a
/// token's column can be computed from its span.
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line:       usize,
    /// Byte offset of the first character of `line`.
    pub line_start: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line:       1,
               line_start: 0, }
    }
}

impl LexerExtras {
    /// Position of the byte `offset` on the current line.
    fn position(&self, source: &str, offset: usize) -> Position {
        let column = source.get(self.line_start..offset)
                           .map_or(0, |prefix| prefix.chars().count());
        Position::new(self.line, column + 1)
    }
}

/// Turns source text into a sequence of tokens paired with their positions.
///
/// Scanning continues past unrecognized characters so that every problem in
/// the input is logged, but the first one is returned as the error.
///
/// # Parameters
/// - `source`: The complete program text.
///
/// # Returns
/// The tokens in source order.
///
/// # Errors
/// - `ParseError::UnrecognizedCharacter` for input that starts no token.
/// - `ParseError::LiteralTooLarge` for integers that do not fit 64 bits.
///
/// # Example
/// ```
/// use foolang::{
///     ast::Position,
///     interpreter::lexer::{Token, tokenize},
/// };
///
/// let tokens = tokenize("a = 2.5;\nprint a;").unwrap();
///
/// assert_eq!(tokens[2], (Token::Float(2.5), Position::new(1, 5)));
/// assert_eq!(tokens[4], (Token::Print, Position::new(2, 1)));
/// assert!(tokenize("a = $;").is_err());
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, Position)>, ParseError> {
    let mut lexer = Token::lexer_with_extras(source, LexerExtras::default());
    let mut tokens = Vec::new();
    let mut first_error = None;

    while let Some(result) = lexer.next() {
        let position = lexer.extras.position(source, lexer.span().start);

        match result {
            Ok(token) => tokens.push((token, position)),
            Err(fault) => {
                let error = fault.into_error(lexer.slice(), position);
                warn!(line = position.line,
                      column = position.column,
                      "{error}");
                first_error.get_or_insert(error);
            },
        }
    }

    if let Some(error) = first_error {
        return Err(error);
    }

    trace!(count = tokens.len(), "tokenized source");
    Ok(tokens)
}

/// The position just past the last character of `source`.
///
/// Used to locate "unexpected end of file" errors.
///
/// # Example
/// ```
/// use foolang::{ast::Position, interpreter::lexer::end_of};
///
/// assert_eq!(end_of("a = 1;\nb ="), Position::new(2, 4));
/// assert_eq!(end_of(""), Position::new(1, 1));
/// ```
#[must_use]
pub fn end_of(source: &str) -> Position {
    let line = source.matches('\n').count() + 1;
    let last_line = source.rsplit('\n').next().unwrap_or_default();
    Position::new(line, last_line.chars().count() + 1)
}

/// Advances the line counter and skips the newline.
fn newline(lex: &mut logos::Lexer<Token>) -> logos::Skip {
    lex.extras.line += 1;
    lex.extras.line_start = lex.span().end;
    logos::Skip
}

/// Parses a floating-point literal from the current token slice.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Some(f64)`: The parsed floating-point value if successful.
/// - `None`: If the token slice is not a valid float.
fn parse_float(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Parses an integer literal from the current token slice.
///
/// # Returns
/// - `Ok(i64)`: The parsed integer value.
/// - `Err(LexFault::IntegerTooLarge)`: If the literal overflows an `i64`.
fn parse_integer(lex: &logos::Lexer<Token>) -> Result<i64, LexFault> {
    lex.slice().parse().map_err(|_| LexFault::IntegerTooLarge)
}

/// Strips the quotes from a string literal and decodes its escapes.
///
/// `\n`, `\t`, `\r`, `\0`, `\\`, `\"` and `\'` are recognized. Any other
/// escape is kept as written, backslash included.
fn parse_string(lex: &logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    let body = &slice[1..slice.len() - 1];

    let mut decoded = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            decoded.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => decoded.push('\n'),
            Some('t') => decoded.push('\t'),
            Some('r') => decoded.push('\r'),
            Some('0') => decoded.push('\0'),
            Some(escaped @ ('\\' | '"' | '\'')) => decoded.push(escaped),
            Some(other) => {
                decoded.push('\\');
                decoded.push(other);
            },
            None => decoded.push('\\'),
        }
    }

    decoded
}
