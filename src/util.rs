/// Numeric conversion helpers.
///
/// This module provides safe functions for converting between integer,
/// index and floating-point types without risking silent data loss or
/// wrap-around. Use these helpers whenever a runtime value crosses between
/// `i64`, `usize` and `f64`.
///
/// All functions return a `Result`, which is `Ok` if the conversion is lossless
/// and valid, or an error if the value is out of range.
pub mod num;
/// Native stack management for recursive code.
///
/// Grows the stack on demand so nesting depth is limited by the language's
/// own limits rather than by the size of the calling thread's stack.
pub mod stack;
