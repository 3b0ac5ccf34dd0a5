use std::iter::Peekable;

use crate::{
    ast::{ArithmeticOperator, ComparisonOperator, Expr, LogicalOperator, Position},
    interpreter::{
        lexer::Token,
        parser::{
            core::ParseResult,
            unary::{parse_postfix, parse_primary, parse_unary},
            utils::Nesting,
        },
    },
};

/// Parses `and`/`or` chains.
///
/// Both operators share one precedence level and associate to the left, so
/// `a or b and c` is `(a or b) and c`.
///
/// Grammar: `logical := equality (("and" | "or") equality)*`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, Position)` pairs.
///
/// # Returns
/// A tree of `Expr::Logical` nodes.
pub fn parse_logical<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let mut left = parse_equality(tokens)?;
    let mut nesting = Nesting::default();

    loop {
        if let Some((token, position)) = tokens.peek()
           && let Some(op) = token_to_logical_operator(token)
        {
            let position = *position;
            tokens.next();
            nesting.descend(position)?;

            let right = parse_equality(tokens)?;

            left = Expr::Logical { left: Box::new(left),
                                   op,
                                   right: Box::new(right),
                                   position };
            continue;
        }

        break;
    }

    Ok(left)
}

/// Parses `==` and `!=`.
///
/// Grammar: `equality := relational (("==" | "!=") relational)*`
pub fn parse_equality<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let mut left = parse_relational(tokens)?;
    let mut nesting = Nesting::default();

    while let Some((token, position)) = tokens.peek() {
        let op = match token_to_comparison_operator(token) {
            Some(op) if !op.is_ordering() => op,
            _ => break,
        };

        let position = *position;
        tokens.next();
        nesting.descend(position)?;

        let right = parse_relational(tokens)?;
        left = Expr::Comparison { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  position };
    }

    Ok(left)
}

/// Parses the ordering operators `<`, `>`, `<=`, `>=`.
///
/// They bind tighter than equality, so `a < b == c < d` compares the two
/// results.
///
/// Grammar: `relational := additive (("<" | ">" | "<=" | ">=") additive)*`
pub fn parse_relational<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let mut left = parse_additive(tokens)?;
    let mut nesting = Nesting::default();

    while let Some((token, position)) = tokens.peek() {
        let op = match token_to_comparison_operator(token) {
            Some(op) if op.is_ordering() => op,
            _ => break,
        };

        let position = *position;
        tokens.next();
        nesting.descend(position)?;

        let right = parse_additive(tokens)?;
        left = Expr::Comparison { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  position };
    }

    Ok(left)
}

/// Parses addition and subtraction expressions.
///
/// Handles left-associative binary operators: `+` and `-`.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
///
/// # Parameters
/// - `tokens`: Token stream with position information.
///
/// # Returns
/// An `Expr::Arithmetic` tree representing the parsed expression.
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let mut left = parse_multiplicative(tokens)?;
    let mut nesting = Nesting::default();
    loop {
        if let Some((token, position)) = tokens.peek()
           && let Some(op) = token_to_arithmetic_operator(token)
           && matches!(op, ArithmeticOperator::Add | ArithmeticOperator::Sub)
        {
            tokens.next();
            nesting.descend(*position)?;
            let right = parse_multiplicative(tokens)?;
            left = Expr::Arithmetic { left: Box::new(left),
                                      op,
                                      right: Box::new(right),
                                      position: *position };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses multiplication-level expressions.
///
/// Handles left-associative operators: `*`, `/`, `//` and `%`. A unary minus
/// in operand position negates the rest of the chain, so `a * -b * c` is
/// `a * -(b * c)`.
///
/// The rule is: `multiplicative := unary (("*" | "/" | "//" | "%") unary)*`
///
/// # Parameters
/// - `tokens`: Token stream with position information.
///
/// # Returns
/// A binary expression tree combining unary-level nodes.
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let mut left = parse_unary(tokens)?;
    let mut nesting = Nesting::default();
    loop {
        if let Some((token, position)) = tokens.peek()
           && let Some(op) = token_to_arithmetic_operator(token)
           && matches!(op,
                       ArithmeticOperator::Mul
                       | ArithmeticOperator::Div
                       | ArithmeticOperator::FloorDiv
                       | ArithmeticOperator::Mod)
        {
            tokens.next();
            nesting.descend(*position)?;
            let right = parse_unary(tokens)?;
            left = Expr::Arithmetic { left: Box::new(left),
                                      op,
                                      right: Box::new(right),
                                      position: *position };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses exponentiation expressions.
///
/// Exponentiation is right-associative: `a ^ b ^ c` parses as `a ^ (b ^ c)`.
/// The exponent may itself be negated, as in `2 ^ -1`.
///
/// The rule is: `exponent := postfix ("^" unary)?`
///
/// # Parameters
/// - `tokens`: Token stream.
///
/// # Returns
/// An exponentiation expression tree.
pub fn parse_exponent<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let primary = parse_primary(tokens)?;
    let base = parse_postfix(tokens, primary)?;

    if let Some((Token::Caret, position)) = tokens.peek() {
        tokens.next();
        let exponent = parse_unary(tokens)?;
        return Ok(Expr::Arithmetic { left:     Box::new(base),
                                     op:       ArithmeticOperator::Pow,
                                     right:    Box::new(exponent),
                                     position: *position, });
    }

    Ok(base)
}

/// Maps a token to its arithmetic operator.
///
/// # Example
/// ```
/// use foolang::{
///     ast::ArithmeticOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_arithmetic_operator},
/// };
///
/// assert_eq!(token_to_arithmetic_operator(&Token::SlashSlash),
///            Some(ArithmeticOperator::FloorDiv));
/// assert_eq!(token_to_arithmetic_operator(&Token::Less), None);
/// ```
#[must_use]
pub const fn token_to_arithmetic_operator(token: &Token) -> Option<ArithmeticOperator> {
    match token {
        Token::Plus => Some(ArithmeticOperator::Add),
        Token::Minus => Some(ArithmeticOperator::Sub),
        Token::Star => Some(ArithmeticOperator::Mul),
        Token::Slash => Some(ArithmeticOperator::Div),
        Token::SlashSlash => Some(ArithmeticOperator::FloorDiv),
        Token::Percent => Some(ArithmeticOperator::Mod),
        Token::Caret => Some(ArithmeticOperator::Pow),
        _ => None,
    }
}

/// Maps a token to its comparison operator.
#[must_use]
pub const fn token_to_comparison_operator(token: &Token) -> Option<ComparisonOperator> {
    match token {
        Token::EqualEqual => Some(ComparisonOperator::Equal),
        Token::BangEqual => Some(ComparisonOperator::NotEqual),
        Token::Less => Some(ComparisonOperator::Less),
        Token::Greater => Some(ComparisonOperator::Greater),
        Token::LessEqual => Some(ComparisonOperator::LessEqual),
        Token::GreaterEqual => Some(ComparisonOperator::GreaterEqual),
        _ => None,
    }
}

/// Maps a token to its logical operator.
#[must_use]
pub const fn token_to_logical_operator(token: &Token) -> Option<LogicalOperator> {
    match token {
        Token::And => Some(LogicalOperator::And),
        Token::Or => Some(LogicalOperator::Or),
        _ => None,
    }
}
