use std::iter::Peekable;

use tracing::debug;

use crate::{
    ast::{Expr, Position, Program, StatementList},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{binary::parse_logical, statement::parse_terminated_statement},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a whole program.
///
/// A program is a sequence of statements, each terminated by `;`. An empty
/// token sequence is an empty program.
///
/// Grammar: `program := (statement ";")*`
///
/// # Parameters
/// - `tokens`: The output of [`tokenize`](crate::interpreter::lexer::tokenize).
/// - `end`: Position just past the end of the source, reported when the
///   tokens run out mid-statement.
///
/// # Returns
/// The root statement list.
///
/// # Example
/// ```
/// use foolang::interpreter::{
///     lexer::{end_of, tokenize},
///     parser::core::parse_program,
/// };
///
/// let source = "a = 1; print a;";
/// let tokens = tokenize(source).unwrap();
/// let program = parse_program(&tokens, end_of(source)).unwrap();
///
/// assert_eq!(program.statements.len(), 2);
/// ```
pub fn parse_program(tokens: &[(Token, Position)], end: Position) -> ParseResult<Program> {
    let position = tokens.first().map_or(end, |(_, position)| *position);
    let mut iter = tokens.iter().peekable();
    let mut statements = Vec::new();

    while iter.peek().is_some() {
        let statement = parse_terminated_statement(&mut iter).map_err(|e| e.at_end_of_input(end))?;
        statements.push(statement);
    }

    debug!(statements = statements.len(), "parsed program");
    Ok(StatementList { statements,
                       position })
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing.
/// It begins at the lowest-precedence binary level, `and`/`or`, and
/// recursively descends through the precedence hierarchy. `not` is handled
/// where an operand is expected and takes a full expression, which makes it
/// the loosest-binding operator overall.
///
/// Grammar: `expression := logical`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, Position)` pairs.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    parse_logical(tokens)
}
