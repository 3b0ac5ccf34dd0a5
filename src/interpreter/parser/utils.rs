use std::{cell::Cell, iter::Peekable};

use crate::{
    ast::Position,
    error::ParseError,
    interpreter::{lexer::Token, parser::core::ParseResult},
};

/// Identifiers that cannot be bound by programs.
///
/// `len` is the length primitive; it parses to its own node and can never be
/// shadowed by a variable, parameter or function.
pub const RESERVED_IDENTIFIERS: &[&str] = &["len"];

/// Checks whether the identifier is reserved.
///
/// # Example
/// ```
/// use foolang::interpreter::parser::utils::is_reserved_identifier;
///
/// assert!(is_reserved_identifier("len"));
/// assert!(!is_reserved_identifier("length"));
/// ```
#[must_use]
pub fn is_reserved_identifier(name: &str) -> bool {
    RESERVED_IDENTIFIERS.contains(&name)
}

/// Deepest nesting of expressions and blocks a program may use.
///
/// Every parenthesis, bracket, prefix operator, block and every operator in
/// a chain such as `1 + 2 + 3` counts as one level, so the limit also bounds
/// the depth of the tree the evaluator walks.
pub const MAX_NESTING: usize = 1024;

thread_local! {
    static NESTING: Cell<usize> = const { Cell::new(0) };
}

/// Tracks the nesting levels entered by one parsing function.
///
/// Levels are given back when the guard is dropped, including when parsing
/// fails part way.
#[derive(Debug, Default)]
pub(in crate::interpreter::parser) struct Nesting {
    entered: usize,
}

impl Nesting {
    /// Enters one more level.
    ///
    /// # Errors
    /// `ParseError::NestingTooDeep` once [`MAX_NESTING`] levels are open.
    pub(in crate::interpreter::parser) fn descend(&mut self, position: Position) -> ParseResult<()> {
        let depth = NESTING.with(Cell::get);
        if depth >= MAX_NESTING {
            return Err(ParseError::NestingTooDeep { limit: MAX_NESTING,
                                                    position });
        }

        NESTING.with(|nesting| nesting.set(depth + 1));
        self.entered += 1;
        Ok(())
    }
}

impl Drop for Nesting {
    fn drop(&mut self) {
        NESTING.with(|nesting| nesting.set(nesting.get().saturating_sub(self.entered)));
    }
}

/// Position of the next token, or the default position at the end of input.
pub(in crate::interpreter::parser) fn next_position<'a, I>(tokens: &mut Peekable<I>) -> Position
    where I: Iterator<Item = &'a (Token, Position)>
{
    tokens.peek().map_or_else(Position::default, |(_, position)| *position)
}

/// The error for running out of tokens.
///
/// The position is filled in by [`parse_program`], which knows where the
/// source ends.
///
/// [`parse_program`]: crate::interpreter::parser::core::parse_program
pub(in crate::interpreter::parser) fn end_of_input<T>() -> ParseResult<T> {
    Err(ParseError::UnexpectedEndOfInput { position: Position::default() })
}

/// Consumes the next token, which must equal `expected`.
///
/// # Parameters
/// - `tokens`: Token iterator.
/// - `expected`: The required token.
/// - `description`: How the requirement reads in an error, e.g. `"';'"`.
///
/// # Returns
/// The position of the consumed token.
///
/// # Errors
/// - `ParseError::Expected` if another token is found.
/// - `ParseError::UnexpectedEndOfInput` if the input ends.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                     expected: &Token,
                                                     description: &'static str)
                                                     -> ParseResult<Position>
    where I: Iterator<Item = &'a (Token, Position)>
{
    match tokens.next() {
        Some((tok, position)) if tok == expected => Ok(*position),
        Some((tok, position)) => Err(ParseError::Expected { expected: description,
                                                            found:    tok.to_string(),
                                                            position: *position, }),
        None => end_of_input(),
    }
}

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by list literals, call arguments and parameter
/// lists. It repeatedly calls `parse_item` to parse one element, expecting
/// either:
///
/// - a comma, to continue the list, or
/// - the specified closing token, to end it.
///
/// An immediately encountered closing token produces an empty list.
///
/// Grammar (simplified): `list := (item ("," item)*)? closing`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first item or closing token.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token that terminates the list (e.g., `]` or `)`).
/// - `separator_description`: Error text for a missing separator, e.g.
///   `"',' or ']'"`.
///
/// # Returns
/// A vector of parsed items.
///
/// # Errors
/// Returns a `ParseError` if:
/// - an item fails to parse,
/// - an unexpected token is encountered,
/// - the stream ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token,
    separator_description: &'static str)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let mut items = Vec::new();
    if let Some((tok, _)) = tokens.peek()
       && tok == closing
    {
        tokens.next();

        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        match tokens.next() {
            Some((Token::Comma, _)) => {},
            Some((tok, _)) if tok == closing => break,
            Some((tok, position)) => {
                return Err(ParseError::Expected { expected: separator_description,
                                                  found:    tok.to_string(),
                                                  position: *position, });
            },
            None => return end_of_input(),
        }
    }
    Ok(items)
}

/// Parses a plain identifier and returns its name and position.
///
/// The next token must be `Token::Identifier`.
/// This function does not check for reserved identifiers; callers must handle
/// that.
///
/// # Errors
/// Returns a `ParseError` if:
/// - the next token is not an identifier,
/// - the input ends unexpectedly.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>)
                                                              -> ParseResult<(String, Position)>
    where I: Iterator<Item = &'a (Token, Position)>
{
    match tokens.next() {
        Some((Token::Identifier(name), position)) => Ok((name.clone(), *position)),
        Some((tok, position)) => Err(ParseError::Expected { expected: "an identifier",
                                                            found:    tok.to_string(),
                                                            position: *position, }),
        None => end_of_input(),
    }
}

/// Parses an identifier that is about to be bound, rejecting reserved names.
///
/// # Errors
/// - `ParseError::IdentifierReserved` for reserved names.
/// - Anything [`parse_identifier`] reports.
pub(in crate::interpreter::parser) fn parse_binding_name<'a, I>(tokens: &mut Peekable<I>)
                                                                -> ParseResult<String>
    where I: Iterator<Item = &'a (Token, Position)>
{
    let (name, position) = parse_identifier(tokens)?;
    if is_reserved_identifier(&name) {
        return Err(ParseError::IdentifierReserved { name, position });
    }
    Ok(name)
}
