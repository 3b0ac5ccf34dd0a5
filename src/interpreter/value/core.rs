use std::fmt;

use crate::{
    ast::{LiteralValue, Position},
    error::RuntimeError,
    interpreter::evaluator::core::EvalResult,
    util::num::i64_to_f64_checked,
};

/// Represents a runtime value in the interpreter.
///
/// Values are plain data: a list owns its elements, so assigning or passing a
/// list copies it and no two bindings ever alias the same container.
/// Functions are not values; they live in scopes as bindings of their own.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A 64-bit signed integer.
    Integer(i64),
    /// A double precision floating-point number.
    Float(f64),
    /// A string of characters.
    String(String),
    /// `True` or `False`.
    Boolean(bool),
    /// An ordered list of values.
    List(Vec<Self>),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::List(v)
    }
}

impl From<&LiteralValue> for Value {
    fn from(lit: &LiteralValue) -> Self {
        match lit {
            LiteralValue::Integer(i) => (*i).into(),
            LiteralValue::Float(n) => (*n).into(),
            LiteralValue::String(s) => s.as_str().into(),
            LiteralValue::Boolean(b) => (*b).into(),
        }
    }
}

impl Value {
    /// The name of this value's type, as used in error messages.
    ///
    /// # Example
    /// ```
    /// use foolang::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::from(1.5).type_name(), "float");
    /// assert_eq!(Value::from(vec![]).type_name(), "list");
    /// ```
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Boolean(_) => "boolean",
            Self::List(_) => "list",
        }
    }

    /// Truthiness used by `if`, `while`, `not`, `and` and `or`.
    ///
    /// `False`, `0`, `0.0`, the empty string and the empty list are falsy;
    /// every other value is truthy.
    ///
    /// # Example
    /// ```
    /// use foolang::interpreter::value::core::Value;
    ///
    /// assert!(Value::from("a").is_truthy());
    /// assert!(!Value::from(0).is_truthy());
    /// assert!(!Value::from(vec![]).is_truthy());
    /// ```
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Integer(n) => *n != 0,
            Self::Float(x) => *x != 0.0,
            Self::String(s) => !s.is_empty(),
            Self::Boolean(b) => *b,
            Self::List(items) => !items.is_empty(),
        }
    }

    /// Returns `true` for integers and floats.
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Float(_))
    }

    /// Converts the value to an `f64`, or returns an error if not numeric.
    ///
    /// For integers, conversion fails if the value is too large to be
    /// represented as `f64` exactly.
    ///
    /// # Parameters
    /// - `position`: Source position for error reporting.
    ///
    /// # Returns
    /// - `Ok(f64)`: If the value is a float or a safe integer.
    /// - `Err(RuntimeError::ExpectedNumber | Overflow)`: If not numeric or not
    ///   representable.
    ///
    /// # Example
    /// ```
    /// use foolang::{ast::Position, interpreter::value::core::Value};
    ///
    /// let x = Value::Integer(10);
    /// assert_eq!(x.as_float(Position::default()).unwrap(), 10.0);
    /// assert!(Value::from("10").as_float(Position::default()).is_err());
    /// ```
    pub fn as_float(&self, position: Position) -> EvalResult<f64> {
        match self {
            Self::Float(x) => Ok(*x),
            Self::Integer(n) => i64_to_f64_checked(*n, RuntimeError::Overflow { position }),
            _ => Err(RuntimeError::ExpectedNumber { found: self.type_name(),
                                                    position }),
        }
    }

    /// Number of elements of a list, or characters of a string.
    ///
    /// Returns `None` for values without a length.
    #[must_use]
    pub fn length(&self) -> Option<usize> {
        match self {
            Self::String(s) => Some(s.chars().count()),
            Self::List(items) => Some(items.len()),
            _ => None,
        }
    }

    /// Writes the value the way it appears inside a list: strings are
    /// quoted, everything else renders as with `Display`.
    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s:?}"),
            _ => write!(f, "{self}"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{x:.1}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Boolean(true) => write!(f, "True"),
            Self::Boolean(false) => write!(f, "False"),
            Self::List(items) => {
                write!(f, "[")?;

                for (index, value) in items.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }

                    value.fmt_nested(f)?;
                }

                write!(f, "]")
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floats_always_show_a_fraction() {
        assert_eq!(Value::Float(2.0).to_string(), "2.0");
        assert_eq!(Value::Float(-3.0).to_string(), "-3.0");
        assert_eq!(Value::Float(5.1).to_string(), "5.1");
    }

    #[test]
    fn strings_are_quoted_only_inside_lists() {
        let list = Value::from(vec![Value::from("abc"), Value::from(1), Value::from(true)]);

        assert_eq!(Value::from("abc").to_string(), "abc");
        assert_eq!(list.to_string(), r#"["abc", 1, True]"#);
    }

    #[test]
    fn nested_lists_render_recursively() {
        let inner = Value::from(vec![Value::from(1), Value::from(2.5)]);
        let outer = Value::from(vec![inner, Value::from(vec![])]);

        assert_eq!(outer.to_string(), "[[1, 2.5], []]");
    }

    #[test]
    fn string_length_counts_characters() {
        assert_eq!(Value::from("héllo").length(), Some(5));
        assert_eq!(Value::from(3).length(), None);
    }
}
