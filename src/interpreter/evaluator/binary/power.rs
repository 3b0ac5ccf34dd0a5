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
    /// Evaluates an exponentiation operation.
    ///
    /// Integer–integer exponentiation with a non-negative exponent uses
    /// checked arithmetic and stays an integer. Negative integer exponents
    /// and float operands are computed in floating-point form with `powf`.
    ///
    /// # Parameters
    /// - `base`: The base value.
    /// - `exponent`: The exponent value.
    /// - `position`: Position of `^` for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the result of `base ^ exponent`.
    ///
    /// # Errors
    /// - `RuntimeError::UnsupportedOperation` unless both operands are numbers.
    /// - `RuntimeError::DivisionByZero` for zero raised to a negative power.
    /// - `RuntimeError::Overflow` if the integer result does not fit.
    ///
    /// # Example
    /// ```
    /// use foolang::{
    ///     ast::Position,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let at = Position::default();
    ///
    /// let result = Context::eval_pow(&Value::Integer(2), &Value::Integer(10), at).unwrap();
    /// assert_eq!(result, Value::Integer(1024));
    ///
    /// let result = Context::eval_pow(&Value::Integer(2), &Value::Integer(-1), at).unwrap();
    /// assert_eq!(result, Value::Float(0.5));
    /// ```
    pub fn eval_pow(base: &Value, exponent: &Value, position: Position) -> EvalResult<Value> {
        use Value::{Float, Integer};

        if !base.is_number() || !exponent.is_number() {
            return Err(unsupported(ArithmeticOperator::Pow, base, exponent, position));
        }

        match (base, exponent) {
            (Integer(0), Integer(e)) if *e < 0 => Err(RuntimeError::DivisionByZero { position }),
            (Integer(b), Integer(e)) if *e >= 0 => {
                let e = u32::try_from(*e).map_err(|_| RuntimeError::Overflow { position })?;
                b.checked_pow(e)
                 .map(Integer)
                 .ok_or(RuntimeError::Overflow { position })
            },
            _ => {
                let b = base.as_float(position)?;
                let e = exponent.as_float(position)?;
                if b == 0.0 && e < 0.0 {
                    return Err(RuntimeError::DivisionByZero { position });
                }
                Ok(Float(b.powf(e)))
            },
        }
    }
}
