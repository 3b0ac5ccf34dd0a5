use crate::{
    ast::{Expr, LogicalOperator},
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            scope::ScopeId,
        },
        value::core::Value,
    },
};

impl Context {
    /// Evaluates `left and right` or `left or right`.
    ///
    /// Operands are tested for truthiness and the result is always a
    /// boolean. The right operand is only evaluated when the left one does
    /// not already decide the result, so `False and (1 / 0)` is `False`.
    ///
    /// # Parameters
    /// - `left`: Left operand expression.
    /// - `op`: The logical operator.
    /// - `right`: Right operand expression.
    /// - `scope`: Frame to evaluate the operands in.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing a boolean.
    pub fn eval_logical(&mut self,
                        left: &Expr,
                        op: LogicalOperator,
                        right: &Expr,
                        scope: ScopeId)
                        -> EvalResult<Value> {
        let left = self.eval_child(left, scope)?.is_truthy();

        let decided = match op {
            LogicalOperator::And => !left,
            LogicalOperator::Or => left,
        };
        if decided {
            return Ok(Value::Boolean(left));
        }

        Ok(Value::Boolean(self.eval_child(right, scope)?.is_truthy()))
    }
}
