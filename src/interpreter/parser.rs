/// Parser entry points.
///
/// Holds the program-level loop and the expression entry point shared by the
/// other parser modules.
pub mod core;

/// Statement parsing.
///
/// Implements `print`, `return`, loops, conditionals, function definitions
/// and assignments, including the checks on assignment targets and
/// parameter lists that are done before evaluation.
pub mod statement;

/// Block parsing.
///
/// Parses brace-delimited statement lists used as loop, branch and function
/// bodies.
pub mod block;

/// Binary operator parsing.
///
/// One function per precedence level, from `and`/`or` down to `^`.
pub mod binary;

/// Unary and primary expression parsing.
///
/// Handles prefix operators, literals, names, calls, list literals,
/// grouping and postfix indexing.
pub mod unary;

/// Utility functions for the parser.
pub mod utils;
