/// Core evaluation logic and context management.
///
/// Contains the `Context` that owns the interpreter state, statement
/// execution, expression dispatch and the `ControlFlow` returned by every
/// statement.
pub mod core;

/// Scope frames.
///
/// An arena of frames linked to their parents, holding value and function
/// bindings.
pub mod scope;

/// Where `print` writes to.
pub mod output;

/// Binary operator evaluation logic.
///
/// Handles arithmetic, comparisons and the short-circuiting logical
/// operators.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements numeric negation and `not`.
pub mod unary;

/// Evaluation of conditional chains.
pub mod conditional;

/// Evaluation of `while` loops.
pub mod while_loop;

/// Function definition and calls.
///
/// Binds definitions together with their defining frame, checks arity and
/// depth, and runs bodies in fresh call frames.
pub mod function;

/// Utility functions for evaluation.
///
/// Provides indexing, `len`, name resolution and indexed assignment.
pub mod utils;
