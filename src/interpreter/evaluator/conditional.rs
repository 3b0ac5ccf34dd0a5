use crate::{
    ast::{ConditionalBranch, StatementList},
    interpreter::evaluator::{
        core::{Context, ControlFlow, EvalResult},
        scope::ScopeId,
    },
};

impl Context {
    /// Executes an `if` / `else if` / `else` chain.
    ///
    /// Branch conditions are evaluated in declaration order until one is
    /// truthy; only that branch runs. If none is, `fallback` runs when
    /// present. The chain itself produces no value, but a `return` inside
    /// the executed branch is passed on.
    pub fn exec_conditional(&mut self,
                            branches: &[ConditionalBranch],
                            fallback: Option<&StatementList>,
                            scope: ScopeId)
                            -> EvalResult<ControlFlow> {
        for branch in branches {
            if self.eval_child(&branch.condition, scope)?.is_truthy() {
                return self.exec_list(&branch.body, scope);
            }
        }

        match fallback {
            Some(body) => self.exec_list(body, scope),
            None => Ok(ControlFlow::Normal(None)),
        }
    }
}
