use tracing::trace;

use crate::{
    ast::{Expr, Program, Statement, StatementList},
    error::{Error, RuntimeError},
    interpreter::{
        evaluator::{
            output::{OutputSink, StdoutSink},
            scope::{Binding, ScopeId, Scopes},
            utils::{index_value, length_of},
        },
        value::core::Value,
    },
    util::stack,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Default limit on nested function calls.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Runtime knobs of a [`Context`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of nested function calls before evaluation fails with
    /// [`RuntimeError::RecursionLimit`].
    pub max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH }
    }
}

/// Outcome of executing a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlFlow {
    /// Execution continues with the next statement. Carries the statement's
    /// value, if it has one.
    Normal(Option<Value>),
    /// A `return` was executed; the enclosing function call ends with this
    /// value.
    Return(Value),
}

/// Stores the runtime evaluation context.
///
/// This struct holds the interpreter state: the scope arena with the root
/// frame, the sink `print` writes to, and the configured call depth limit.
///
/// ## Usage
///
/// `Context` is created once and reused across inputs. Bindings made by one
/// call to [`run`](Self::run) are visible to the next, which is what the
/// REPL relies on.
///
/// # Example
/// ```
/// use foolang::interpreter::{evaluator::core::Context, value::core::Value};
///
/// let mut context = Context::new();
/// context.run("function double(x) { return x * 2; };").unwrap();
///
/// let results = context.run("double(21);").unwrap();
/// assert_eq!(results, vec![Some(Value::Integer(42))]);
/// ```
pub struct Context {
    pub(crate) scopes: Scopes,
    output:            Box<dyn OutputSink>,
    config:            Config,
    depth:             usize,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Creates a context that prints to standard output.
    #[must_use]
    pub fn new() -> Self {
        Self::with_output(StdoutSink)
    }

    /// Creates a context that prints to `sink`.
    #[must_use]
    pub fn with_output(sink: impl OutputSink + 'static) -> Self {
        Self { scopes: Scopes::new(),
               output: Box::new(sink),
               config: Config::default(),
               depth:  0, }
    }

    /// Replaces the runtime configuration.
    ///
    /// # Example
    /// ```
    /// use foolang::interpreter::evaluator::core::{Config, Context};
    ///
    /// let context = Context::new().with_config(Config { max_depth: 8 });
    /// assert_eq!(context.config().max_depth, 8);
    /// ```
    #[must_use]
    pub const fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> Config {
        self.config
    }

    /// Returns the value bound to `name` in the root frame, if any.
    #[must_use]
    pub fn global(&self, name: &str) -> Option<&Value> {
        match self.scopes.local(Scopes::ROOT, name) {
            Some(Binding::Value(value)) => Some(value),
            _ => None,
        }
    }

    /// Parses and runs `source` in this context.
    ///
    /// Returns one entry per top-level statement: `Some` for `print` and for
    /// expression statements that produce a value, `None` otherwise.
    ///
    /// # Errors
    /// Returns the first parse or runtime error. Statements executed before a
    /// runtime error keep their effects.
    pub fn run(&mut self, source: &str) -> Result<Vec<Option<Value>>, Error> {
        let program = crate::parse(source)?;
        Ok(self.run_program(&program)?)
    }

    /// Runs an already parsed program in the root frame.
    pub fn run_program(&mut self, program: &Program) -> EvalResult<Vec<Option<Value>>> {
        let mut results = Vec::with_capacity(program.statements.len());

        for statement in &program.statements {
            let value = match self.exec_statement(statement, Scopes::ROOT)? {
                ControlFlow::Normal(value) => value,
                ControlFlow::Return(value) => Some(value),
            };
            results.push(value);
        }

        Ok(results)
    }

    /// Executes the statements of a block in order.
    ///
    /// Stops at the first statement that returns and passes the return on.
    /// Blocks share the frame they run in; they never open a scope of their
    /// own.
    pub fn exec_list(&mut self, list: &StatementList, scope: ScopeId) -> EvalResult<ControlFlow> {
        for statement in &list.statements {
            if let ControlFlow::Return(value) = self.exec_statement(statement, scope)? {
                return Ok(ControlFlow::Return(value));
            }
        }

        Ok(ControlFlow::Normal(None))
    }

    /// Executes a single statement in `scope`.
    ///
    /// # Parameters
    /// - `statement`: Statement to execute.
    /// - `scope`: Frame that assignments and definitions write to.
    ///
    /// # Returns
    /// `ControlFlow::Return` if a `return` was executed, otherwise
    /// `ControlFlow::Normal` with the statement's value.
    pub fn exec_statement(&mut self,
                          statement: &Statement,
                          scope: ScopeId)
                          -> EvalResult<ControlFlow> {
        trace!(kind = statement.kind(), position = %statement.position(), "executing statement");

        stack::guarded(|| self.exec_node(statement, scope))
    }

    fn exec_node(&mut self, statement: &Statement, scope: ScopeId) -> EvalResult<ControlFlow> {
        match statement {
            Statement::Assign { name, value, .. } => {
                let value = self.eval_child(value, scope)?;
                self.scopes.define(scope, name.as_str(), Binding::Value(value));
                Ok(ControlFlow::Normal(None))
            },
            Statement::IndexAssign { target,
                                     index,
                                     value,
                                     position, } => {
                self.exec_index_assign(target, index, value, *position, scope)?;
                Ok(ControlFlow::Normal(None))
            },
            Statement::Print { expr, position } => {
                let value = self.eval_child(expr, scope)?;
                self.output
                    .emit(&value)
                    .map_err(|e| RuntimeError::Output { message:  e.to_string(),
                                                        position: *position, })?;
                Ok(ControlFlow::Normal(Some(value)))
            },
            Statement::Conditional { branches, fallback, .. } => {
                self.exec_conditional(branches, fallback.as_ref(), scope)
            },
            Statement::Loop { condition, body, .. } => self.exec_loop(condition, body, scope),
            Statement::Function(def) => {
                self.define_function(def, scope)?;
                Ok(ControlFlow::Normal(None))
            },
            Statement::Return { expr, position } => {
                if self.depth == 0 {
                    return Err(RuntimeError::ReturnOutsideFunction { position: *position });
                }
                Ok(ControlFlow::Return(self.eval_child(expr, scope)?))
            },
            Statement::Expression { expr, .. } => Ok(ControlFlow::Normal(self.eval(expr, scope)?)),
        }
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation.
    /// The evaluator dispatches based on expression variant: literals,
    /// lookups, lists, indexing, arithmetic, comparisons, logical and unary
    /// operators, function calls and `len`.
    ///
    /// # Returns
    /// `Some(Value)` for expressions that produce a value. Only a call to a
    /// function that finishes without `return` yields `None`.
    ///
    /// # Example
    /// ```
    /// use foolang::{
    ///     ast::{ArithmeticOperator, Expr, Position},
    ///     interpreter::{
    ///         evaluator::{core::Context, scope::Scopes},
    ///         value::core::Value,
    ///     },
    /// };
    ///
    /// let position = Position::new(1, 1);
    /// let expr = Expr::Arithmetic { left: Box::new(Expr::Literal { value: 7.into(),
    ///                                                              position }),
    ///                               op: ArithmeticOperator::FloorDiv,
    ///                               right: Box::new(Expr::Literal { value: 2.into(),
    ///                                                               position }),
    ///                               position };
    ///
    /// let mut context = Context::new();
    /// assert_eq!(context.eval(&expr, Scopes::ROOT).unwrap(), Some(Value::Integer(3)));
    /// ```
    pub fn eval(&mut self, expr: &Expr, scope: ScopeId) -> EvalResult<Option<Value>> {
        stack::guarded(|| self.eval_node(expr, scope))
    }

    fn eval_node(&mut self, expr: &Expr, scope: ScopeId) -> EvalResult<Option<Value>> {
        let value = match expr {
            Expr::Literal { value, .. } => Value::from(value),
            Expr::Lookup { name, position } => self.lookup_value(name, *position, scope)?,
            Expr::List { items, .. } => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    values.push(self.eval_child(item, scope)?);
                }
                Value::List(values)
            },
            Expr::Index { target,
                          index,
                          position, } => {
                let target = self.eval_child(target, scope)?;
                let index = self.eval_child(index, scope)?;
                index_value(&target, &index, *position)?
            },
            Expr::Arithmetic { left,
                               op,
                               right,
                               position, } => {
                let left = self.eval_child(left, scope)?;
                let right = self.eval_child(right, scope)?;
                Self::eval_arithmetic(*op, &left, &right, *position)?
            },
            Expr::Comparison { left,
                               op,
                               right,
                               position, } => {
                let left = self.eval_child(left, scope)?;
                let right = self.eval_child(right, scope)?;
                Self::eval_comparison(*op, &left, &right, *position)?
            },
            Expr::Logical { left, op, right, .. } => self.eval_logical(left, *op, right, scope)?,
            Expr::Unary { op,
                          operand,
                          position, } => {
                let operand = self.eval_child(operand, scope)?;
                Self::eval_unary(*op, &operand, *position)?
            },
            Expr::FunctionCall { name,
                                 arguments,
                                 position, } => {
                return self.call_function(name, arguments, *position, scope);
            },
            Expr::Length { operand, position } => {
                let operand = self.eval_child(operand, scope)?;
                length_of(&operand, *position)?
            },
        };

        Ok(Some(value))
    }

    /// Evaluates a subexpression and ensures that it produces a value.
    ///
    /// Reports [`RuntimeError::MissingValue`] at the subexpression's position
    /// when it yields nothing.
    pub fn eval_child(&mut self, expr: &Expr, scope: ScopeId) -> EvalResult<Value> {
        self.eval(expr, scope)?
            .ok_or(RuntimeError::MissingValue { position: expr.position() })
    }

    pub(crate) const fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) const fn enter_call(&mut self) {
        self.depth += 1;
    }

    pub(crate) const fn leave_call(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
