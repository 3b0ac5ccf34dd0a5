use crate::{
    ast::{ArithmeticOperator, Position},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates an arithmetic operation between two values.
    ///
    /// `+` also concatenates strings and lists and is routed to
    /// `eval_add`. `^` calls `eval_pow`. The remaining operators are numeric
    /// only and go through `eval_numeric`.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `position`: Position of the operator for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    ///
    /// # Example
    /// ```
    /// use foolang::{
    ///     ast::{ArithmeticOperator, Position},
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let at = Position::default();
    ///
    /// let sum = Context::eval_arithmetic(ArithmeticOperator::Add, &1.into(), &2.into(), at);
    /// assert_eq!(sum.unwrap(), Value::Integer(3));
    ///
    /// let joined = Context::eval_arithmetic(ArithmeticOperator::Add, &"a".into(), &"b".into(), at);
    /// assert_eq!(joined.unwrap(), Value::from("ab"));
    /// ```
    pub fn eval_arithmetic(op: ArithmeticOperator,
                           left: &Value,
                           right: &Value,
                           position: Position)
                           -> EvalResult<Value> {
        match op {
            ArithmeticOperator::Add => Self::eval_add(left, right, position),
            ArithmeticOperator::Pow => Self::eval_pow(left, right, position),
            ArithmeticOperator::Sub
            | ArithmeticOperator::Mul
            | ArithmeticOperator::Div
            | ArithmeticOperator::FloorDiv
            | ArithmeticOperator::Mod => Self::eval_numeric(op, left, right, position),
        }
    }
}

/// Builds the error for an operator applied to operand types it does not
/// support.
pub(crate) fn unsupported(op: ArithmeticOperator,
                          left: &Value,
                          right: &Value,
                          position: Position)
                          -> RuntimeError {
    RuntimeError::UnsupportedOperation { op: op.to_string(),
                                         left: left.type_name(),
                                         right: right.type_name(),
                                         position }
}
