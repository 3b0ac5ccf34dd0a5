use crate::{
    ast::{Expr, StatementList},
    interpreter::evaluator::{
        core::{Context, ControlFlow, EvalResult},
        scope::ScopeId,
    },
};

impl Context {
    /// Executes a `while` loop.
    ///
    /// The condition is re-evaluated before every iteration, so a loop whose
    /// condition is falsy from the start never runs its body. The body runs
    /// in the same frame as the loop; assignments inside it are visible
    /// after the loop ends.
    ///
    /// # Parameters
    /// - `condition`: Loop condition, tested for truthiness.
    /// - `body`: Statements to repeat.
    /// - `scope`: Frame the loop runs in.
    ///
    /// # Returns
    /// `ControlFlow::Return` if the body executed a `return`, which also ends
    /// the loop; otherwise `ControlFlow::Normal(None)`.
    ///
    /// # Example
    /// ```
    /// use foolang::interpreter::{evaluator::core::Context, value::core::Value};
    ///
    /// let mut context = Context::new();
    /// context.run("i = 0; total = 0; while (i < 5) { total = total + i; i = i + 1; };")
    ///        .unwrap();
    ///
    /// assert_eq!(context.global("total"), Some(&Value::Integer(10)));
    /// ```
    pub fn exec_loop(&mut self,
                     condition: &Expr,
                     body: &StatementList,
                     scope: ScopeId)
                     -> EvalResult<ControlFlow> {
        while self.eval_child(condition, scope)?.is_truthy() {
            if let ControlFlow::Return(value) = self.exec_list(body, scope)? {
                return Ok(ControlFlow::Return(value));
            }
        }

        Ok(ControlFlow::Normal(None))
    }
}
