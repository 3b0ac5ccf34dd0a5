use crate::{ast::Position, error::RuntimeError};

/// Largest integer magnitude exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Safely converts an `i64` to `f64` if and only if it is exactly
/// representable.
///
/// Mixed integer/float arithmetic goes through this function so that an
/// integer is never silently rounded when it meets a float.
///
/// ## Errors
/// Returns `Err(error)` if the value exceeds `MAX_SAFE_U64_INT` in absolute
/// value.
///
/// ## Parameters
/// - `value`: The integer to convert.
/// - `error`: The error to return if conversion is not lossless.
///
/// ## Example
/// ```
/// use foolang::util::num::{MAX_SAFE_U64_INT, i64_to_f64_checked};
///
/// // Works for safe values
/// let result = i64_to_f64_checked(42, "too big!");
/// assert_eq!(result.unwrap(), 42.0);
///
/// // Fails for values outside safe range
/// let big = MAX_SAFE_U64_INT as i64 + 1;
/// assert!(i64_to_f64_checked(big, "too big!").is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn i64_to_f64_checked<E>(value: i64, error: E) -> Result<f64, E> {
    if value.unsigned_abs() > MAX_SAFE_U64_INT {
        return Err(error);
    }
    Ok(value as f64)
}

/// Converts an index value to a `usize`, rejecting negative indices.
///
/// Indices never wrap around: `-1` is an error, not the last element.
///
/// ## Errors
/// - `RuntimeError::NegativeIndex` for negative values.
/// - `RuntimeError::IndexOutOfBounds` when the value does not fit a `usize`
///   (only possible on narrow targets); `len` is used for the message.
///
/// ## Example
/// ```
/// use foolang::{ast::Position, error::RuntimeError, util::num::index_to_usize};
///
/// let at = Position::new(1, 1);
/// assert_eq!(index_to_usize(2, 3, at).unwrap(), 2);
///
/// let err = index_to_usize(-1, 3, at).unwrap_err();
/// assert!(matches!(err, RuntimeError::NegativeIndex { index: -1, .. }));
/// ```
pub fn index_to_usize(value: i64, len: usize, position: Position) -> Result<usize, RuntimeError> {
    if value < 0 {
        return Err(RuntimeError::NegativeIndex { index: value,
                                                 position });
    }

    usize::try_from(value).map_err(|_| RuntimeError::IndexOutOfBounds { index: usize::MAX,
                                                                        len,
                                                                        position })
}

/// Converts a length to an `i64` so it can become an integer value.
///
/// ## Errors
/// Returns `RuntimeError::Overflow` if the length exceeds `i64::MAX`.
///
/// ## Example
/// ```
/// use foolang::{ast::Position, util::num::usize_to_i64_checked};
///
/// assert_eq!(usize_to_i64_checked(7, Position::default()).unwrap(), 7);
/// ```
pub fn usize_to_i64_checked(value: usize, position: Position) -> Result<i64, RuntimeError> {
    i64::try_from(value).map_err(|_| RuntimeError::Overflow { position })
}
