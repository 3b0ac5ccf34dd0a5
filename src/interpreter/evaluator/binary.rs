/// Dispatch of arithmetic operators.
pub mod core;

/// `+`, `-`, `*`, `/`, `//` and `%`.
///
/// Integer results use checked arithmetic; floor division and modulo round
/// towards negative infinity.
pub mod arithmetic;

/// Exponentiation.
pub mod power;

/// Equality and ordering comparisons.
pub mod comparison;

/// Short-circuiting `and` / `or`.
pub mod logic;
