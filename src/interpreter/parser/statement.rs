use std::{collections::HashSet, iter::Peekable, rc::Rc};

use crate::{
    ast::{ConditionalBranch, Expr, FunctionDef, Position, Statement},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            block::parse_block,
            core::{ParseResult, parse_expression},
            utils::{end_of_input, expect, parse_binding_name, parse_comma_separated},
        },
    },
};

/// Parses a statement followed by its terminating `;`.
///
/// Every statement is terminated, including compound ones:
/// `if (x) { y = 1; };`.
pub fn parse_terminated_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let statement = parse_statement(tokens)?;
    expect(tokens, &Token::Semicolon, "';'")?;
    Ok(statement)
}

/// Parses a single statement, without its terminator.
///
/// A statement may be one of:
/// - `print expression`
/// - `return expression`
/// - a `while` loop
/// - an `if` / `else if` / `else` chain
/// - a function definition
/// - an assignment `name = expression` or `target[index] = expression`
/// - an expression used as a statement.
///
/// The leading keyword decides the form; anything else starts with an
/// expression, which becomes an assignment target if `=` follows.
///
/// # Parameters
/// - `tokens`: Token iterator containing `(Token, Position)` pairs.
///
/// # Returns
/// A parsed [`Statement`] node.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let Some((token, position)) = tokens.peek() else {
        return end_of_input();
    };
    let position = *position;

    match token {
        Token::Print => {
            tokens.next();
            let expr = parse_expression(tokens)?;
            Ok(Statement::Print { expr, position })
        },
        Token::Return => {
            tokens.next();
            let expr = parse_expression(tokens)?;
            Ok(Statement::Return { expr, position })
        },
        Token::While => parse_loop(tokens, position),
        Token::If => parse_conditional(tokens, position),
        Token::Function => parse_function_definition(tokens, position),
        _ => parse_assignment_or_expression(tokens, position),
    }
}

/// Parses a `while` loop.
///
/// Grammar: `loop := "while" "(" expression ")" block`
fn parse_loop<'a, I>(tokens: &mut Peekable<I>, position: Position) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    tokens.next();
    expect(tokens, &Token::LParen, "'(' after while")?;
    let condition = parse_expression(tokens)?;
    expect(tokens, &Token::RParen, "')' after loop condition")?;
    let body = parse_block(tokens)?;

    Ok(Statement::Loop { condition,
                         body,
                         position })
}

/// Parses a conditional chain.
///
/// Syntax:
/// ```text
///     if (<condition>) { .. }
///     else if (<condition>) { .. }
///     else { .. }
/// ```
/// Any number of `else if` branches may follow the first one; the final
/// `else` is optional.
///
/// # Parameters
/// - `tokens`: Token stream positioned at the `if` keyword.
/// - `position`: Position of the `if` token.
///
/// # Returns
/// A `Statement::Conditional` holding the branches in declaration order.
fn parse_conditional<'a, I>(tokens: &mut Peekable<I>, position: Position) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let mut branches = vec![parse_conditional_branch(tokens)?];
    let mut fallback = None;

    while let Some((Token::Else, _)) = tokens.peek() {
        tokens.next();

        if let Some((Token::If, _)) = tokens.peek() {
            branches.push(parse_conditional_branch(tokens)?);
            continue;
        }

        fallback = Some(parse_block(tokens)?);
        break;
    }

    Ok(Statement::Conditional { branches,
                                fallback,
                                position })
}

/// Parses `if (<condition>) { .. }`.
fn parse_conditional_branch<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<ConditionalBranch>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let position = expect(tokens, &Token::If, "'if'")?;
    expect(tokens, &Token::LParen, "'(' after if")?;
    let condition = parse_expression(tokens)?;
    expect(tokens, &Token::RParen, "')' after condition")?;
    let body = parse_block(tokens)?;

    Ok(ConditionalBranch { condition,
                           body,
                           position })
}

/// Parses a function definition of the form
/// `function <name>(param1, param2, ...) { body }`.
///
/// Neither the name nor any parameter may be reserved, and parameter names
/// must be distinct.
///
/// # Errors
/// Returns a `ParseError` if:
/// - the name or a parameter is reserved,
/// - a parameter is repeated,
/// - the parameter list or body is malformed,
/// - input ends unexpectedly.
fn parse_function_definition<'a, I>(tokens: &mut Peekable<I>,
                                    position: Position)
                                    -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    tokens.next();
    let name = parse_binding_name(tokens)?;

    expect(tokens, &Token::LParen, "'(' after function name")?;
    let params = parse_comma_separated(tokens, parse_binding_name, &Token::RParen, "',' or ')'")?;

    let mut seen = HashSet::new();
    if let Some(duplicate) = params.iter().find(|param| !seen.insert(param.as_str())) {
        return Err(ParseError::DuplicateParameter { name: duplicate.clone(),
                                                    function: name,
                                                    position });
    }

    let body = parse_block(tokens)?;

    Ok(Statement::Function(Rc::new(FunctionDef { name,
                                                 params,
                                                 body,
                                                 position })))
}

/// Parses an expression statement, turning it into an assignment when `=`
/// follows.
///
/// Valid targets are a plain name (`a = ..`) and a name followed by one or
/// more index steps (`a[i] = ..`, `grid[i][j] = ..`). Anything else on the
/// left of `=` is rejected here, before the program runs.
///
/// # Errors
/// - `ParseError::InvalidAssignmentTarget` for targets such as `1 = 2` or
///   `f(x) = 3`.
fn parse_assignment_or_expression<'a, I>(tokens: &mut Peekable<I>,
                                         position: Position)
                                         -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let expr = parse_expression(tokens)?;

    if !matches!(tokens.peek(), Some((Token::Equals, _))) {
        return Ok(Statement::Expression { expr, position });
    }
    tokens.next();
    let value = parse_expression(tokens)?;

    match expr {
        Expr::Lookup { name, position } => Ok(Statement::Assign { name,
                                                                  value,
                                                                  position }),
        Expr::Index { target,
                      index,
                      position, } => {
            if !is_rooted_at_name(&target) {
                return Err(ParseError::InvalidAssignmentTarget { target:   target.describe(),
                                                                 position: target.position(), });
            }
            Ok(Statement::IndexAssign { target: *target,
                                        index: *index,
                                        value,
                                        position })
        },
        other => Err(ParseError::InvalidAssignmentTarget { target:   other.describe(),
                                                           position: other.position(), }),
    }
}

/// Whether `expr` is a name, possibly followed by index steps.
fn is_rooted_at_name(expr: &Expr) -> bool {
    match expr {
        Expr::Lookup { .. } => true,
        Expr::Index { target, .. } => is_rooted_at_name(target),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ast::{ArithmeticOperator, LogicalOperator, UnaryOperator},
        error::ErrorKind,
        interpreter::lexer::tokenize,
    };

    fn parse_one(source: &str) -> ParseResult<Statement> {
        let tokens = tokenize(source).unwrap();
        let mut iter = tokens.iter().peekable();
        parse_terminated_statement(&mut iter)
    }

    fn parse_expr(source: &str) -> Expr {
        match parse_one(source).unwrap() {
            Statement::Expression { expr, .. } => expr,
            other => panic!("expected an expression statement, got {other:?}"),
        }
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let Expr::Arithmetic { op, right, .. } = parse_expr("1 + 2 * 3;") else {
            panic!("expected arithmetic");
        };
        assert_eq!(op, ArithmeticOperator::Add);
        assert!(matches!(*right,
                         Expr::Arithmetic { op: ArithmeticOperator::Mul,
                                            .. }));
    }

    #[test]
    fn exponent_is_right_associative() {
        let Expr::Arithmetic { op, right, .. } = parse_expr("2 ^ 3 ^ 2;") else {
            panic!("expected arithmetic");
        };
        assert_eq!(op, ArithmeticOperator::Pow);
        assert!(matches!(*right,
                         Expr::Arithmetic { op: ArithmeticOperator::Pow,
                                            .. }));
    }

    #[test]
    fn unary_minus_wraps_exponent() {
        let Expr::Unary { op, operand, .. } = parse_expr("-2 ^ 2;") else {
            panic!("expected unary");
        };
        assert_eq!(op, UnaryOperator::Negate);
        assert!(matches!(*operand,
                         Expr::Arithmetic { op: ArithmeticOperator::Pow,
                                            .. }));
    }

    #[test]
    fn not_takes_the_rest_of_the_expression() {
        let Expr::Logical { op, right, .. } = parse_expr("a and not b or c;") else {
            panic!("expected logical");
        };
        assert_eq!(op, LogicalOperator::And);
        let Expr::Unary { operand, .. } = *right else {
            panic!("expected not");
        };
        assert!(matches!(*operand,
                         Expr::Logical { op: LogicalOperator::Or,
                                         .. }));
    }

    #[test]
    fn and_or_share_a_level() {
        let Expr::Logical { op, left, .. } = parse_expr("a or b and c;") else {
            panic!("expected logical");
        };
        assert_eq!(op, LogicalOperator::And);
        assert!(matches!(*left,
                         Expr::Logical { op: LogicalOperator::Or,
                                         .. }));
    }

    #[test]
    fn chained_index_assignment() {
        let statement = parse_one("grid[1][2] = 0;").unwrap();

        let Statement::IndexAssign { target, .. } = statement else {
            panic!("expected index assignment");
        };
        assert!(matches!(target, Expr::Index { .. }));
    }

    #[test]
    fn else_if_chain_keeps_declaration_order() {
        let statement =
            parse_one("if (a) { x = 1; } else if (b) { x = 2; } else if (c) { x = 3; } else { x = 4; };")
                .unwrap();

        let Statement::Conditional { branches, fallback, .. } = statement else {
            panic!("expected conditional");
        };
        assert_eq!(branches.len(), 3);
        assert!(fallback.is_some());
    }

    #[test]
    fn invalid_assignment_targets_are_lexical_errors() {
        for source in ["1 = 2;", "f(x) = 1;", "[1][0] = 2;", "a + b = 3;"] {
            let error = parse_one(source).unwrap_err();
            assert_eq!(error.kind(), ErrorKind::Lexical, "{source}");
        }
    }

    #[test]
    fn len_cannot_be_bound() {
        for source in ["len = 1;", "function len(x) { return x; };", "function f(len) { return 1; };"] {
            let error = parse_one(source).unwrap_err();
            assert!(matches!(error, ParseError::IdentifierReserved { .. }), "{source}");
        }
    }

    #[test]
    fn duplicate_parameters_are_rejected() {
        let error = parse_one("function f(a, a) { return a; };").unwrap_err();

        assert!(matches!(error, ParseError::DuplicateParameter { .. }));
    }

    #[test]
    fn empty_blocks_are_syntax_errors() {
        let error = parse_one("while (True) { };").unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn missing_semicolon_is_reported() {
        let error = parse_one("a = 1").unwrap_err();

        assert!(matches!(error, ParseError::UnexpectedEndOfInput { .. }));
    }

    #[test]
    fn bang_is_not_an_operator() {
        let error = parse_one("!True;").unwrap_err();

        assert!(matches!(error, ParseError::UnexpectedToken { .. }));
    }
}
