use std::iter::Peekable;

use crate::{
    ast::{Expr, LiteralValue, Position, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            binary::{parse_exponent, parse_multiplicative},
            core::{ParseResult, parse_expression},
            utils::{
                Nesting, end_of_input, expect, is_reserved_identifier, next_position,
                parse_comma_separated,
            },
        },
    },
    util::stack,
};

/// Parses a unary expression.
///
/// Supports prefix operators:
/// - `-`  (numeric negation), whose operand extends over a whole
///   multiplicative chain: `-2 ^ 2` is `-(2 ^ 2)` and `-a * b` is `-(a * b)`.
/// - `not` (logical not), whose operand is a complete expression: `not a ==
///   b` is `not (a == b)`.
///
/// If no unary operator is present, the function delegates to
/// [`parse_exponent`].
///
/// Every expression nested inside another one passes through here, so this
/// is where nesting is counted against
/// [`MAX_NESTING`](crate::interpreter::parser::utils::MAX_NESTING).
///
/// Grammar:
/// ```text
///     unary := "-" multiplicative
///            | "not" expression
///            | exponent
/// ```
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// An [`Expr::Unary`] or an exponent-level expression.
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let mut nesting = Nesting::default();
    nesting.descend(next_position(tokens))?;

    stack::guarded(|| parse_prefixed(tokens))
}

fn parse_prefixed<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    if let Some((Token::Minus, position)) = tokens.peek() {
        tokens.next();
        let operand = parse_multiplicative(tokens)?;
        Ok(Expr::Unary { op:       UnaryOperator::Negate,
                         operand:  Box::new(operand),
                         position: *position, })
    } else if let Some((Token::Not, position)) = tokens.peek() {
        tokens.next();
        let operand = parse_expression(tokens)?;
        Ok(Expr::Unary { op:       UnaryOperator::Not,
                         operand:  Box::new(operand),
                         position: *position, })
    } else {
        parse_exponent(tokens)
    }
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar and include:
/// - integer, float, string and boolean literals
/// - names, function calls and `len(..)`
/// - parenthesized expressions
/// - list literals (`[ ... ]`)
///
/// This function does not handle unary operators or postfix indexing.
///
/// Grammar (simplified):
/// ```text
///     primary := literal
///              | identifier_or_call
///              | "(" expression ")"
///              | "[" elements "]"
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of a primary expression.
///
/// # Returns
/// The parsed primary [`Expr`] or a `ParseError` on failure.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let Some((token, position)) = tokens.next() else {
        return end_of_input();
    };
    let position = *position;

    match token {
        Token::Integer(n) => Ok(literal(*n, position)),
        Token::Float(x) => Ok(literal(*x, position)),
        Token::String(s) => Ok(literal(s.as_str(), position)),
        Token::Boolean(b) => Ok(literal(*b, position)),
        Token::Identifier(name) => parse_identifier_or_call(tokens, name, position),
        Token::LBracket => parse_list_literal(tokens, position),
        Token::LParen => parse_grouping(tokens),
        tok => Err(ParseError::UnexpectedToken { token: tok.to_string(),
                                                 position }),
    }
}

/// Parses postfix indexing applied to an expression.
///
/// Multiple chained indices are allowed:
/// ```text
///        grid[0][1]
/// ```
///
/// Grammar:
/// ```text
///     postfix := primary
///              | postfix "[" expression "]"
/// ```
/// # Parameters
/// - `tokens`: Token iterator after a primary expression.
/// - `node`: The expression being indexed.
///
/// # Returns
/// An updated [`Expr`] with all postfix operators folded in.
///
/// # Errors
/// Returns a `ParseError` if an `[` is not properly closed with `]`, the
/// index expression fails to parse, or the chain of indices is nested too
/// deeply.
pub(crate) fn parse_postfix<'a, I>(tokens: &mut Peekable<I>, mut node: Expr) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let mut nesting = Nesting::default();
    while let Some((Token::LBracket, position)) = tokens.peek() {
        tokens.next();
        nesting.descend(*position)?;
        let index = parse_expression(tokens)?;
        expect(tokens, &Token::RBracket, "']' after index")?;

        node = Expr::Index { target:   Box::new(node),
                             index:    Box::new(index),
                             position: *position, };
    }
    Ok(node)
}

fn literal(value: impl Into<LiteralValue>, position: Position) -> Expr {
    Expr::Literal { value: value.into(),
                    position }
}

/// Parses a name, a function call `name(args)` or the length primitive
/// `len(expr)`.
///
/// `len` may not appear anywhere else; using it as a plain name is a
/// [`ParseError::IdentifierReserved`].
///
/// # Parameters
/// - `tokens`: Token iterator positioned after the identifier.
/// - `name`: The identifier.
/// - `position`: Position of the identifier.
fn parse_identifier_or_call<'a, I>(tokens: &mut Peekable<I>,
                                   name: &str,
                                   position: Position)
                                   -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let is_call = matches!(tokens.peek(), Some((Token::LParen, _)));

    if is_reserved_identifier(name) {
        if !is_call {
            return Err(ParseError::IdentifierReserved { name: name.to_string(),
                                                        position });
        }
        tokens.next();
        let operand = parse_expression(tokens)?;
        expect(tokens, &Token::RParen, "')' after len argument")?;

        return Ok(Expr::Length { operand: Box::new(operand),
                                 position });
    }

    if !is_call {
        return Ok(Expr::Lookup { name: name.to_string(),
                                 position });
    }

    tokens.next();
    let arguments = parse_comma_separated(tokens, parse_expression, &Token::RParen, "',' or ')'")?;

    Ok(Expr::FunctionCall { name: name.to_string(),
                            arguments,
                            position })
}

/// Parses a list literal of the form `[expr1, expr2, ..., exprN]`.
///
/// Elements are parsed using `parse_expression`, separated by commas.
/// `[]` is the empty list.
///
/// # Parameters
/// - `tokens`: Token iterator positioned after `[`.
/// - `position`: Position of `[`.
fn parse_list_literal<'a, I>(tokens: &mut Peekable<I>, position: Position) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let items = parse_comma_separated(tokens, parse_expression, &Token::RBracket, "',' or ']'")?;

    Ok(Expr::List { items, position })
}

/// Parses a parenthesized expression.
///
/// Expected form `( expression )`
///
/// Grammar `grouping := "(" expression ")"`
///
/// # Parameters
/// - `tokens`: Token iterator positioned after `(`.
///
/// # Returns
/// The inner expression as-is (no wrapper node).
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let expr = parse_expression(tokens)?;
    expect(tokens, &Token::RParen, "')'")?;
    Ok(expr)
}
