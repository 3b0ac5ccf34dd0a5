use crate::{
    ast::{ArithmeticOperator, Position},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            binary::core::unsupported,
            core::{Context, EvalResult},
        },
        value::core::Value,
    },
};

impl Context {
    /// Evaluates `left + right`.
    ///
    /// - two integers give an integer,
    /// - a float with any number gives a float,
    /// - two strings or two lists are concatenated into a new value.
    ///
    /// # Errors
    /// `RuntimeError::UnsupportedOperation` for any other pair of types,
    /// `RuntimeError::Overflow` if integer addition overflows.
    pub fn eval_add(left: &Value, right: &Value, position: Position) -> EvalResult<Value> {
        use Value::{Float, Integer, List, String};

        match (left, right) {
            (Integer(a), Integer(b)) => a.checked_add(*b)
                                         .map(Integer)
                                         .ok_or(RuntimeError::Overflow { position }),
            (Float(_), Integer(_) | Float(_)) | (Integer(_), Float(_)) => {
                Ok(Float(left.as_float(position)? + right.as_float(position)?))
            },
            (String(a), String(b)) => Ok(String(format!("{a}{b}"))),
            (List(a), List(b)) => Ok(List(a.iter().chain(b).cloned().collect())),
            _ => Err(unsupported(ArithmeticOperator::Add, left, right, position)),
        }
    }

    /// Evaluates a numeric-only operator: `-`, `*`, `/`, `//` or `%`.
    ///
    /// `/` always produces a float. The other operators produce an integer
    /// when both operands are integers and a float otherwise. `//` and `%`
    /// are floored, so the remainder takes the sign of the divisor:
    /// `-7 // 2` is `-4` and `-7 % 2` is `1`.
    ///
    /// # Errors
    /// - `RuntimeError::UnsupportedOperation` unless both operands are numbers.
    /// - `RuntimeError::DivisionByZero` for `/`, `//` and `%` with a zero
    ///   divisor.
    /// - `RuntimeError::Overflow` if integer arithmetic overflows.
    ///
    /// # Example
    /// ```
    /// use foolang::{
    ///     ast::{ArithmeticOperator, Position},
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let at = Position::default();
    /// let m = Context::eval_numeric(ArithmeticOperator::Mod,
    ///                               &Value::Integer(-7),
    ///                               &Value::Integer(2),
    ///                               at).unwrap();
    /// assert_eq!(m, Value::Integer(1));
    ///
    /// let d = Context::eval_numeric(ArithmeticOperator::Div,
    ///                               &Value::Integer(1),
    ///                               &Value::Integer(2),
    ///                               at).unwrap();
    /// assert_eq!(d, Value::Float(0.5));
    /// ```
    pub fn eval_numeric(op: ArithmeticOperator,
                        left: &Value,
                        right: &Value,
                        position: Position)
                        -> EvalResult<Value> {
        use ArithmeticOperator::{Div, FloorDiv, Mod};

        if !left.is_number() || !right.is_number() {
            return Err(unsupported(op, left, right, position));
        }

        if matches!(op, Div | FloorDiv | Mod) && is_zero(right) {
            return Err(RuntimeError::DivisionByZero { position });
        }

        match (left, right) {
            (Value::Integer(a), Value::Integer(b)) if op != Div => {
                integer_op(op, *a, *b, position).map(Value::Integer)
            },
            _ => {
                let a = left.as_float(position)?;
                let b = right.as_float(position)?;
                float_op(op, a, b, position).map(Value::Float)
            },
        }
    }
}

fn is_zero(value: &Value) -> bool {
    match value {
        Value::Integer(n) => *n == 0,
        Value::Float(x) => *x == 0.0,
        _ => false,
    }
}

fn integer_op(op: ArithmeticOperator, a: i64, b: i64, position: Position) -> EvalResult<i64> {
    let overflow = RuntimeError::Overflow { position };

    match op {
        ArithmeticOperator::Sub => a.checked_sub(b).ok_or(overflow),
        ArithmeticOperator::Mul => a.checked_mul(b).ok_or(overflow),
        ArithmeticOperator::FloorDiv => {
            let quotient = a.checked_div(b).ok_or_else(|| overflow.clone())?;
            let remainder = a.checked_rem(b).ok_or(overflow)?;
            if remainder != 0 && (remainder < 0) != (b < 0) {
                Ok(quotient - 1)
            } else {
                Ok(quotient)
            }
        },
        ArithmeticOperator::Mod => {
            let remainder = a.checked_rem(b).ok_or(overflow)?;
            if remainder != 0 && (remainder < 0) != (b < 0) {
                Ok(remainder + b)
            } else {
                Ok(remainder)
            }
        },
        _ => Err(unsupported(op, &Value::Integer(a), &Value::Integer(b), position)),
    }
}

fn float_op(op: ArithmeticOperator, a: f64, b: f64, position: Position) -> EvalResult<f64> {
    match op {
        ArithmeticOperator::Sub => Ok(a - b),
        ArithmeticOperator::Mul => Ok(a * b),
        ArithmeticOperator::Div => Ok(a / b),
        ArithmeticOperator::FloorDiv => Ok(float_divmod(a, b).0),
        ArithmeticOperator::Mod => Ok(float_divmod(a, b).1),
        _ => Err(unsupported(op, &Value::Float(a), &Value::Float(b), position)),
    }
}

/// Floored quotient and remainder of `a / b`.
///
/// The quotient is derived from the remainder, so `q * b + r` reproduces `a`
/// as closely as floats allow even when `a / b` rounds across an integer.
fn float_divmod(a: f64, b: f64) -> (f64, f64) {
    let mut remainder = a % b;
    let mut quotient = (a - remainder) / b;
    if remainder != 0.0 && (remainder < 0.0) != (b < 0.0) {
        remainder += b;
        quotient -= 1.0;
    }

    let mut floored = quotient.floor();
    if quotient - floored > 0.5 {
        floored += 1.0;
    }
    (floored, remainder)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numeric(op: ArithmeticOperator, a: impl Into<Value>, b: impl Into<Value>) -> EvalResult<Value> {
        Context::eval_numeric(op, &a.into(), &b.into(), Position::default())
    }

    #[test]
    fn floor_division_rounds_down() {
        assert_eq!(numeric(ArithmeticOperator::FloorDiv, 7_i64, 2_i64).unwrap(), Value::Integer(3));
        assert_eq!(numeric(ArithmeticOperator::FloorDiv, -7_i64, 2_i64).unwrap(), Value::Integer(-4));
        assert_eq!(numeric(ArithmeticOperator::FloorDiv, 7_i64, -2_i64).unwrap(), Value::Integer(-4));
        assert_eq!(numeric(ArithmeticOperator::FloorDiv, 7.5, 2_i64).unwrap(), Value::Float(3.0));
    }

    #[test]
    fn float_floor_division_agrees_with_modulo() {
        let (a, b) = (7.0, 0.1);
        let Value::Float(q) = numeric(ArithmeticOperator::FloorDiv, a, b).unwrap() else {
            panic!("expected a float quotient");
        };
        let Value::Float(r) = numeric(ArithmeticOperator::Mod, a, b).unwrap() else {
            panic!("expected a float remainder");
        };

        assert_eq!(q, 69.0);
        assert!((q * b + r - a).abs() < 1e-9);
        assert_eq!(numeric(ArithmeticOperator::FloorDiv, -7.5, 2.0).unwrap(), Value::Float(-4.0));
        assert_eq!(numeric(ArithmeticOperator::Mod, -7.5, 2.0).unwrap(), Value::Float(0.5));
    }

    #[test]
    fn modulo_follows_the_divisor() {
        assert_eq!(numeric(ArithmeticOperator::Mod, 7_i64, 3_i64).unwrap(), Value::Integer(1));
        assert_eq!(numeric(ArithmeticOperator::Mod, -7_i64, 3_i64).unwrap(), Value::Integer(2));
        assert_eq!(numeric(ArithmeticOperator::Mod, 7_i64, -3_i64).unwrap(), Value::Integer(-2));
        assert_eq!(numeric(ArithmeticOperator::Mod, -5.5, 2_i64).unwrap(), Value::Float(0.5));
    }

    #[test]
    fn zero_divisors_are_rejected_for_every_division() {
        for op in [ArithmeticOperator::Div, ArithmeticOperator::FloorDiv, ArithmeticOperator::Mod] {
            assert!(matches!(numeric(op, 1_i64, 0_i64), Err(RuntimeError::DivisionByZero { .. })));
            assert!(matches!(numeric(op, 1.0, 0.0), Err(RuntimeError::DivisionByZero { .. })));
        }
    }

    #[test]
    fn integer_overflow_is_an_error() {
        assert!(matches!(numeric(ArithmeticOperator::Mul, i64::MAX, 2_i64),
                         Err(RuntimeError::Overflow { .. })));
        assert!(matches!(numeric(ArithmeticOperator::FloorDiv, i64::MIN, -1_i64),
                         Err(RuntimeError::Overflow { .. })));
        assert!(matches!(Context::eval_add(&Value::Integer(i64::MAX), &Value::Integer(1), Position::default()),
                         Err(RuntimeError::Overflow { .. })));
    }

    #[test]
    fn concatenation_copies_lists() {
        let left = Value::from(vec![Value::Integer(1)]);
        let right = Value::from(vec![Value::Integer(2)]);

        let joined = Context::eval_add(&left, &right, Position::default()).unwrap();

        assert_eq!(joined.to_string(), "[1, 2]");
        assert_eq!(left.to_string(), "[1]");
    }

    #[test]
    fn mixed_types_are_unsupported() {
        let error = Context::eval_add(&Value::from("a"), &Value::Integer(1), Position::default()).unwrap_err();

        assert_eq!(error.to_string(), "Unsupported operation for type: string + integer");
        assert!(matches!(numeric(ArithmeticOperator::Sub, true, 1_i64),
                         Err(RuntimeError::UnsupportedOperation { .. })));
    }
}
