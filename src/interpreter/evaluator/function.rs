use std::rc::Rc;

use tracing::debug;

use crate::{
    ast::{Expr, FunctionDef, Position},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, ControlFlow, EvalResult},
            scope::{Binding, ScopeId},
        },
        value::core::Value,
    },
};

impl Context {
    /// Binds a function definition in `scope`.
    ///
    /// The binding remembers `scope`, so the body later resolves free names
    /// where the function was written rather than where it is called.
    ///
    /// # Errors
    /// - `RuntimeError::FunctionAlreadyDefined` if `scope` itself already
    ///   binds a function of the same name. Shadowing a function of an outer
    ///   frame is allowed.
    pub(crate) fn define_function(&mut self, def: &Rc<FunctionDef>, scope: ScopeId) -> EvalResult<()> {
        if let Some(Binding::Function(..)) = self.scopes.local(scope, &def.name) {
            return Err(RuntimeError::FunctionAlreadyDefined { name:     def.name.clone(),
                                                              position: def.position, });
        }

        debug!(name = %def.name, arity = def.params.len(), "defined function");
        self.scopes
            .define(scope, def.name.as_str(), Binding::Function(Rc::clone(def), scope));
        Ok(())
    }

    /// Evaluates a call to a user-defined function.
    ///
    /// The name must resolve to a function binding. Arguments are evaluated
    /// left to right in the caller's frame, then a new frame chained to the
    /// function's defining frame receives the parameters and runs the body.
    /// The frame is discarded when the call ends, whether it succeeded or
    /// not.
    ///
    /// # Parameters
    /// - `name`: Called name.
    /// - `arguments`: Argument expressions.
    /// - `position`: Call site.
    /// - `scope`: Caller's frame.
    ///
    /// # Returns
    /// The value of the executed `return`, or `None` if the body finished
    /// without one.
    ///
    /// # Errors
    /// - `RuntimeError::UndefinedFunction` if nothing is bound to `name`.
    /// - `RuntimeError::NotCallable` if `name` is bound to a value.
    /// - `RuntimeError::ArgumentCountMismatch` on an arity mismatch.
    /// - `RuntimeError::RecursionLimit` when the call would exceed the
    ///   configured depth.
    /// - Anything raised by the arguments or the body.
    pub(crate) fn call_function(&mut self,
                                name: &str,
                                arguments: &[Expr],
                                position: Position,
                                scope: ScopeId)
                                -> EvalResult<Option<Value>> {
        let (def, defining_scope) = match self.scopes.lookup(scope, name) {
            Some(Binding::Function(def, defining_scope)) => (Rc::clone(def), *defining_scope),
            Some(Binding::Value(_)) => {
                return Err(RuntimeError::NotCallable { name: name.to_string(),
                                                       position });
            },
            None => {
                return Err(RuntimeError::UndefinedFunction { name: name.to_string(),
                                                             position });
            },
        };

        if arguments.len() != def.params.len() {
            return Err(RuntimeError::ArgumentCountMismatch { name: name.to_string(),
                                                             expected: def.params.len(),
                                                             found: arguments.len(),
                                                             position });
        }

        let mut values = Vec::with_capacity(arguments.len());
        for argument in arguments {
            values.push(self.eval_child(argument, scope)?);
        }

        let limit = self.config().max_depth;
        if self.depth() >= limit {
            return Err(RuntimeError::RecursionLimit { limit, position });
        }

        debug!(name, arity = values.len(), depth = self.depth() + 1, "calling function");

        let frame = self.scopes.push(defining_scope);
        for (param, value) in def.params.iter().zip(values) {
            self.scopes.define(frame, param.as_str(), Binding::Value(value));
        }

        self.enter_call();
        let outcome = self.exec_list(&def.body, frame);
        self.leave_call();
        self.scopes.pop();

        match outcome? {
            ControlFlow::Return(value) => Ok(Some(value)),
            ControlFlow::Normal(_) => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use crate::{
        error::{Error, RuntimeError},
        interpreter::{
            evaluator::core::{Config, Context},
            value::core::Value,
        },
    };

    #[test]
    fn frames_are_released_after_failed_calls() {
        let mut context = Context::new();
        context.run("function boom(x) { return x / 0; };").unwrap();

        assert!(context.run("boom(1);").is_err());
        assert_eq!(context.scopes.depth(), 1);
        assert_eq!(context.run("1;").unwrap(), vec![Some(Value::Integer(1))]);
    }

    #[test]
    fn recursion_limit_is_configurable() {
        let mut context = Context::new().with_config(Config { max_depth: 16 });
        context.run("function down(n) { return down(n + 1); };").unwrap();

        let error = context.run("down(0);").unwrap_err();

        assert!(matches!(error,
                         Error::Runtime(RuntimeError::RecursionLimit { limit: 16, .. })));
        assert_eq!(context.scopes.depth(), 1);
    }

    #[test]
    fn arguments_are_evaluated_left_to_right() {
        let output = Rc::new(RefCell::new(Vec::<String>::new()));
        let mut context = Context::with_output(Rc::clone(&output));

        context.run("function show(x) { print x; return x; };\n\
                     function pair(a, b) { return [a, b]; };\n\
                     pair(show(1), show(2));")
               .unwrap();

        assert_eq!(*output.borrow(), vec!["1", "2"]);
    }

    #[test]
    fn inner_functions_are_local_to_the_call() {
        let mut context = Context::new();

        context.run("function outer() { function inner() { return 1; }; return inner(); };")
               .unwrap();

        assert_eq!(context.run("outer();").unwrap(), vec![Some(Value::Integer(1))]);
        assert!(context.run("inner();").is_err());
    }
}
