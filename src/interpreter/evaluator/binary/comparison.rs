use std::{cmp::Ordering, mem::discriminant};

use crate::{
    ast::{ComparisonOperator, Position},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a comparison of the form `Value <Operator> Value`.
    ///
    /// Both operands must have the same runtime type; an integer and a float
    /// count as different types. `==` and `!=` compare structurally, lists
    /// included. The ordering operators work on numbers, strings
    /// (lexicographically) and booleans (`False < True`), but not on lists.
    ///
    /// # Parameters
    /// - `op`: The comparison operator.
    /// - `left`: The left-hand value.
    /// - `right`: The right-hand value.
    /// - `position`: Position of the operator used for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing a boolean result.
    ///
    /// # Errors
    /// - `RuntimeError::NonMatchingTypes` if the operand types differ.
    /// - `RuntimeError::Unordered` for `<`, `>`, `<=`, `>=` on lists.
    ///
    /// # Example
    /// ```
    /// use foolang::{
    ///     ast::{ComparisonOperator, Position},
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let at = Position::default();
    ///
    /// let result = Context::eval_comparison(ComparisonOperator::Less, &"abc".into(), &"abd".into(), at);
    /// assert_eq!(result.unwrap(), Value::Boolean(true));
    ///
    /// let result = Context::eval_comparison(ComparisonOperator::Equal, &Value::Integer(1), &Value::Float(1.0), at);
    /// assert!(result.is_err());
    /// ```
    pub fn eval_comparison(op: ComparisonOperator,
                           left: &Value,
                           right: &Value,
                           position: Position)
                           -> EvalResult<Value> {
        if discriminant(left) != discriminant(right) {
            return Err(RuntimeError::NonMatchingTypes { left: left.type_name(),
                                                        right: right.type_name(),
                                                        position });
        }

        let result = match op {
            ComparisonOperator::Equal => left == right,
            ComparisonOperator::NotEqual => left != right,
            ComparisonOperator::Less
            | ComparisonOperator::Greater
            | ComparisonOperator::LessEqual
            | ComparisonOperator::GreaterEqual => {
                let ordering = order(left, right).ok_or_else(|| RuntimeError::Unordered { op: op.to_string(),
                                                                                          type_name: left.type_name(),
                                                                                          position })?;
                match op {
                    ComparisonOperator::Less => ordering == Some(Ordering::Less),
                    ComparisonOperator::Greater => ordering == Some(Ordering::Greater),
                    ComparisonOperator::LessEqual => {
                        matches!(ordering, Some(Ordering::Less | Ordering::Equal))
                    },
                    _ => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
                }
            },
        };

        Ok(Value::Boolean(result))
    }
}

/// Orders two values of the same type.
///
/// The outer `None` means the type has no order at all; the inner `None` is
/// an unordered pair of floats (a NaN), for which every ordering comparison
/// is false.
fn order(left: &Value, right: &Value) -> Option<Option<Ordering>> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Some(Some(a.cmp(b))),
        (Value::Float(a), Value::Float(b)) => Some(a.partial_cmp(b)),
        (Value::String(a), Value::String(b)) => Some(Some(a.cmp(b))),
        (Value::Boolean(a), Value::Boolean(b)) => Some(Some(a.cmp(b))),
        _ => None,
    }
}
