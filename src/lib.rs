//! # foolang
//!
//! foolang is a small imperative scripting language written in Rust.
//! Programs are sequences of `;`-terminated statements over integers, floats,
//! strings, booleans and lists, with `while` loops, `if` / `else if` / `else`
//! chains and lexically scoped recursive functions.
//!
//! ```
//! use foolang::{evaluate, interpreter::value::core::Value};
//!
//! let results = evaluate("function fact(n) { if (n < 2) { return 1; }; return n * fact(n - 1); }; fact(10);")
//!     .unwrap();
//!
//! assert_eq!(results.last(), Some(&Some(Value::Integer(3_628_800))));
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    ast::Program,
    error::Error,
    interpreter::{
        evaluator::core::Context,
        lexer::{end_of, tokenize},
        parser::core::parse_program,
        value::core::Value,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Statement` and `Expr` enums and related types
/// that represent the syntactic structure of a program as a tree. The AST is
/// built by the parser and walked by the evaluator.
///
/// # Responsibilities
/// - Defines statement and expression types for all language constructs.
/// - Attaches source positions to every node for error reporting.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while tokenizing,
/// parsing or running a program, each with a category and a source
/// position, plus the caret renderer used by the command-line front end.
///
/// # Responsibilities
/// - Defines error enums for both phases.
/// - Classifies every error into an [`error::ErrorKind`].
/// - Renders diagnostics against the source text.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation and the runtime
/// value type.
///
/// # Responsibilities
/// - Coordinates the lexer, parser and evaluator.
/// - Defines the runtime `Value` type.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for safe numeric conversion.
///
/// Safe conversions between `i64`, `usize` and `f64` without silent data
/// loss, shared by the evaluator and the value type.
pub mod util;

/// Tokenizes and parses `source` into a program.
///
/// # Errors
/// Returns the first lexical, syntax or structural error.
///
/// # Examples
/// ```
/// use foolang::{error::ErrorKind, parse};
///
/// let program = parse("x = [1, 2]; print x[0];").unwrap();
/// assert_eq!(program.statements.len(), 2);
///
/// let error = parse("1 = 2;").unwrap_err();
/// assert_eq!(error.kind(), ErrorKind::Lexical);
/// ```
pub fn parse(source: &str) -> Result<Program, Error> {
    let tokens = tokenize(source)?;
    Ok(parse_program(&tokens, end_of(source))?)
}

/// Runs `source` in a fresh context that prints to standard output.
///
/// Returns one entry per top-level statement: `Some` for `print` and for
/// expression statements that produce a value, `None` otherwise.
///
/// # Errors
/// Returns an error if parsing fails or any runtime error occurs.
///
/// # Examples
/// ```
/// use foolang::{evaluate, interpreter::value::core::Value};
///
/// let results = evaluate("a = 1; a + 1.5;").unwrap();
/// assert_eq!(results, vec![None, Some(Value::Float(2.5))]);
///
/// // 'y' is not defined
/// assert!(evaluate("x = y + 1;").is_err());
/// ```
pub fn evaluate(source: &str) -> Result<Vec<Option<Value>>, Error> {
    Context::new().run(source)
}
