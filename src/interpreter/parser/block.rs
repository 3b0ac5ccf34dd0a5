use std::iter::Peekable;

use crate::{
    ast::{Position, StatementList},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::ParseResult,
            statement::parse_terminated_statement,
            utils::{Nesting, end_of_input, expect},
        },
    },
    util::stack,
};

/// Parses a block delimited by braces.
///
/// A block holds one or more statements, each terminated by `;`. Parsing
/// continues until the closing `}` token is encountered.
///
/// Grammar: `block := "{" (statement ";")+ "}"`
///
/// # Parameters
/// - `tokens`: Token stream positioned at the opening brace.
///
/// # Returns
/// The statements of the block.
///
/// # Errors
/// - `ParseError::Expected` if the block does not start with `{`.
/// - `ParseError::UnexpectedToken` for an empty block.
/// - `ParseError::NestingTooDeep` if the block opens one level too many.
/// - Anything a contained statement reports.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<StatementList>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let position = expect(tokens, &Token::LBrace, "'{'")?;
    let mut nesting = Nesting::default();
    nesting.descend(position)?;
    let mut statements = Vec::new();

    loop {
        match tokens.peek() {
            Some((Token::RBrace, close)) => {
                if statements.is_empty() {
                    return Err(ParseError::UnexpectedToken { token:    Token::RBrace.to_string(),
                                                             position: *close, });
                }
                tokens.next();
                break;
            },
            Some(_) => statements.push(stack::guarded(|| parse_terminated_statement(tokens))?),
            None => return end_of_input(),
        }
    }

    Ok(StatementList { statements,
                       position })
}
