use crate::{
    ast::{Expr, Position},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            scope::{Binding, ScopeId},
        },
        value::core::Value,
    },
    util::num::{index_to_usize, usize_to_i64_checked},
};

/// Reads `target[index]`.
///
/// Lists yield the element; strings yield the character at `index` as a
/// one-character string.
///
/// # Errors
/// - `RuntimeError::NotIndexable` if `target` is neither a list nor a string.
/// - `RuntimeError::IndexNotInteger`, `NegativeIndex` or `IndexOutOfBounds`
///   for a bad index.
///
/// # Example
/// ```
/// use foolang::{
///     ast::Position,
///     interpreter::{evaluator::utils::index_value, value::core::Value},
/// };
///
/// let word = Value::from("héllo");
/// let e = index_value(&word, &Value::Integer(1), Position::default()).unwrap();
/// assert_eq!(e, Value::from("é"));
///
/// let list = Value::from(vec![Value::Integer(1)]);
/// assert!(index_value(&list, &Value::Integer(1), Position::default()).is_err());
/// ```
pub fn index_value(target: &Value, index: &Value, position: Position) -> EvalResult<Value> {
    match target {
        Value::List(items) => {
            let index = checked_index(index, items.len(), position)?;
            Ok(items[index].clone())
        },
        Value::String(s) => {
            let len = s.chars().count();
            let index = checked_index(index, len, position)?;
            s.chars()
             .nth(index)
             .map(|c| Value::String(c.to_string()))
             .ok_or(RuntimeError::IndexOutOfBounds { index,
                                                     len,
                                                     position })
        },
        _ => Err(RuntimeError::NotIndexable { type_name: target.type_name(),
                                              position }),
    }
}

/// Returns `target` with the element at `index` replaced by `element`.
///
/// Lists accept any element. Strings accept a one-character string and
/// replace the character at `index`.
///
/// # Errors
/// The same as [`index_value`], plus `RuntimeError::InvalidStringElement`
/// when storing anything but a single character into a string.
pub fn store_element(target: Value,
                     index: &Value,
                     element: Value,
                     position: Position)
                     -> EvalResult<Value> {
    match target {
        Value::List(mut items) => {
            let index = checked_index(index, items.len(), position)?;
            items[index] = element;
            Ok(Value::List(items))
        },
        Value::String(s) => {
            let index = checked_index(index, s.chars().count(), position)?;
            let replacement = match &element {
                Value::String(c) if c.chars().count() == 1 => c.as_str(),
                _ => {
                    return Err(RuntimeError::InvalidStringElement { found: element.to_string(),
                                                                    position });
                },
            };

            let updated = s.chars()
                           .enumerate()
                           .map(|(i, c)| if i == index { replacement.to_string() } else { c.to_string() })
                           .collect::<String>();
            Ok(Value::String(updated))
        },
        other => Err(RuntimeError::NotIndexable { type_name: other.type_name(),
                                                  position }),
    }
}

/// Computes `len(value)`.
///
/// # Errors
/// `RuntimeError::NoLength` for values other than strings and lists, and
/// `RuntimeError::Overflow` if the length does not fit an integer.
pub fn length_of(value: &Value, position: Position) -> EvalResult<Value> {
    let length = value.length()
                      .ok_or(RuntimeError::NoLength { type_name: value.type_name(),
                                                      position })?;
    Ok(Value::Integer(usize_to_i64_checked(length, position)?))
}

/// Validates an index value against a container of length `len`.
fn checked_index(index: &Value, len: usize, position: Position) -> EvalResult<usize> {
    match index {
        Value::Integer(i) => {
            let index = index_to_usize(*i, len, position)?;
            if index >= len {
                return Err(RuntimeError::IndexOutOfBounds { index,
                                                            len,
                                                            position });
            }
            Ok(index)
        },
        other => Err(RuntimeError::IndexNotInteger { type_name: other.type_name(),
                                                     position }),
    }
}

/// Replaces the element at the end of `path` inside `container`, updating
/// every container along the way.
fn replace_at(container: Value,
              path: &[(Value, Position)],
              element: Value)
              -> EvalResult<Value> {
    match path {
        [] => Ok(element),
        [(index, position), rest @ ..] => {
            let child = index_value(&container, index, *position)?;
            let child = replace_at(child, rest, element)?;
            store_element(container, index, child, *position)
        },
    }
}

impl Context {
    /// Resolves a name used as a value.
    ///
    /// # Errors
    /// - `RuntimeError::UndefinedName` if no reachable frame binds `name`.
    /// - `RuntimeError::FunctionUsedAsValue` if `name` is bound to a function.
    pub(crate) fn lookup_value(&self, name: &str, position: Position, scope: ScopeId) -> EvalResult<Value> {
        match self.scopes.lookup(scope, name) {
            Some(Binding::Value(value)) => Ok(value.clone()),
            Some(Binding::Function(..)) => {
                Err(RuntimeError::FunctionUsedAsValue { name: name.to_string(),
                                                        position })
            },
            None => Err(RuntimeError::UndefinedName { name: name.to_string(),
                                                      position }),
        }
    }

    /// Executes `target[index] = value`.
    ///
    /// `target` is a name followed by zero or more index steps, e.g. `grid[i]`
    /// in `grid[i][j] = v`. The right-hand side is evaluated first, then the
    /// root name is resolved and the indices are evaluated left to right. The
    /// updated root value is written into `scope`, so a function assigning
    /// into a global list works on its own copy.
    ///
    /// # Errors
    /// Any error from [`index_value`] or [`store_element`] along the path, and
    /// the lookup errors of the root name.
    pub(crate) fn exec_index_assign(&mut self,
                                    target: &Expr,
                                    index: &Expr,
                                    value: &Expr,
                                    position: Position,
                                    scope: ScopeId)
                                    -> EvalResult<()> {
        let element = self.eval_child(value, scope)?;

        let mut steps = vec![(index, position)];
        let mut root = target;
        while let Expr::Index { target,
                                index,
                                position, } = root
        {
            steps.push((index.as_ref(), *position));
            root = target.as_ref();
        }

        let Expr::Lookup { name,
                           position: root_position, } = root
        else {
            return Err(RuntimeError::NotIndexable { type_name: "an expression",
                                                    position:  root.position(), });
        };

        let container = self.lookup_value(name, *root_position, scope)?;

        let mut path = Vec::with_capacity(steps.len());
        for (index, position) in steps.into_iter().rev() {
            path.push((self.eval_child(index, scope)?, position));
        }

        let updated = replace_at(container, &path, element)?;
        self.scopes.define(scope, name.as_str(), Binding::Value(updated));
        Ok(())
    }
}
