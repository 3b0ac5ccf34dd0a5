use thiserror::Error;

use crate::{ast::Position, error::ErrorKind};

/// Represents all errors that can occur during evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Tried to use a name that is not bound in any reachable scope.
    #[error("Undefined name: {name}")]
    UndefinedName {
        /// The name that was looked up.
        name:     String,
        /// The use site.
        position: Position,
    },
    /// Called a function that is not bound in any reachable scope.
    #[error("Undefined function: {name}")]
    UndefinedFunction {
        /// The name of the function.
        name:     String,
        /// The call site.
        position: Position,
    },
    /// Called a name that is bound to a value.
    #[error("{name} is not callable")]
    NotCallable {
        /// The called name.
        name:     String,
        /// The call site.
        position: Position,
    },
    /// Used a function name where a value was required.
    #[error("{name} is a function, not a value")]
    FunctionUsedAsValue {
        /// The function name.
        name:     String,
        /// The use site.
        position: Position,
    },
    /// Attempted to define a function twice in the same scope.
    #[error("Function {name} is already defined in this scope")]
    FunctionAlreadyDefined {
        /// The name of the function.
        name:     String,
        /// Position of the second definition.
        position: Position,
    },
    /// The wrong number of arguments was supplied to a function.
    #[error("Function {name} takes {expected} argument(s) but {found} were given")]
    ArgumentCountMismatch {
        /// The called function.
        name:     String,
        /// Declared parameter count.
        expected: usize,
        /// Supplied argument count.
        found:    usize,
        /// The call site.
        position: Position,
    },
    /// An arithmetic operator was applied to operands it does not support.
    #[error("Unsupported operation for type: {left} {op} {right}")]
    UnsupportedOperation {
        /// The operator as written.
        op:       String,
        /// Type of the left operand.
        left:     &'static str,
        /// Type of the right operand.
        right:    &'static str,
        /// Position of the operator.
        position: Position,
    },
    /// A comparison between values of different types.
    #[error("Cannot compare non-matching types {left} and {right}")]
    NonMatchingTypes {
        /// Type of the left operand.
        left:     &'static str,
        /// Type of the right operand.
        right:    &'static str,
        /// Position of the operator.
        position: Position,
    },
    /// An ordering operator on a type without an order.
    #[error("Cannot use {op} on values of type {type_name}")]
    Unordered {
        /// The operator as written.
        op:        String,
        /// Type of the operands.
        type_name: &'static str,
        /// Position of the operator.
        position:  Position,
    },
    /// A numeric value was expected, but not found.
    #[error("Expected a number, found {found}")]
    ExpectedNumber {
        /// Type of the value found instead.
        found:    &'static str,
        /// Position of the operator.
        position: Position,
    },
    /// Attempted division by zero.
    #[error("Division by zero")]
    DivisionByZero {
        /// Position of the operator.
        position: Position,
    },
    /// Integer arithmetic overflowed.
    #[error("Integer overflow")]
    Overflow {
        /// Position of the operator.
        position: Position,
    },
    /// Tried to index a value that is neither a list nor a string.
    #[error("Cannot index into {type_name}")]
    NotIndexable {
        /// Type of the indexed value.
        type_name: &'static str,
        /// Position of the brackets.
        position:  Position,
    },
    /// The index is not an integer.
    #[error("Index must be an integer, found {type_name}")]
    IndexNotInteger {
        /// Type of the index value.
        type_name: &'static str,
        /// Position of the brackets.
        position:  Position,
    },
    /// The index is negative.
    #[error("Index must be non-negative, found {index}")]
    NegativeIndex {
        /// The index value.
        index:    i64,
        /// Position of the brackets.
        position: Position,
    },
    /// Tried to access an element outside the allowed bounds.
    #[error("Index {index} out of range for length {len}")]
    IndexOutOfBounds {
        /// The index that was actually requested.
        index:    usize,
        /// Length of the indexed value.
        len:      usize,
        /// Position of the brackets.
        position: Position,
    },
    /// Stored something other than a one-character string into a string.
    #[error("Can only store a single character into a string, found {found}")]
    InvalidStringElement {
        /// Description of the rejected value.
        found:    String,
        /// Position of the brackets.
        position: Position,
    },
    /// `len` on a value without a length.
    #[error("Value of type {type_name} has no length")]
    NoLength {
        /// Type of the operand.
        type_name: &'static str,
        /// Position of `len`.
        position:  Position,
    },
    /// An expected value was missing, e.g. the result of a function that
    /// finished without `return`.
    #[error("Expression produced no value")]
    MissingValue {
        /// Position of the expression.
        position: Position,
    },
    /// `return` executed outside any function body.
    #[error("Return outside of function")]
    ReturnOutsideFunction {
        /// Position of `return`.
        position: Position,
    },
    /// Too many nested function calls.
    #[error("Maximum call depth of {limit} exceeded")]
    RecursionLimit {
        /// The configured limit.
        limit:    usize,
        /// The call that went over the limit.
        position: Position,
    },
    /// Writing to the output sink failed.
    #[error("Failed to write output: {message}")]
    Output {
        /// The underlying I/O error message.
        message:  String,
        /// Position of `print`.
        position: Position,
    },
}

impl RuntimeError {
    /// The category of this error.
    ///
    /// Unbound names are lookup errors; everything else is a runtime error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UndefinedName { .. } | Self::UndefinedFunction { .. } => ErrorKind::Lookup,
            _ => ErrorKind::Runtime,
        }
    }

    /// Where in the source the error was detected.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::UndefinedName { position, .. }
            | Self::UndefinedFunction { position, .. }
            | Self::NotCallable { position, .. }
            | Self::FunctionUsedAsValue { position, .. }
            | Self::FunctionAlreadyDefined { position, .. }
            | Self::ArgumentCountMismatch { position, .. }
            | Self::UnsupportedOperation { position, .. }
            | Self::NonMatchingTypes { position, .. }
            | Self::Unordered { position, .. }
            | Self::ExpectedNumber { position, .. }
            | Self::DivisionByZero { position }
            | Self::Overflow { position }
            | Self::NotIndexable { position, .. }
            | Self::IndexNotInteger { position, .. }
            | Self::NegativeIndex { position, .. }
            | Self::IndexOutOfBounds { position, .. }
            | Self::InvalidStringElement { position, .. }
            | Self::NoLength { position, .. }
            | Self::MissingValue { position }
            | Self::ReturnOutsideFunction { position }
            | Self::RecursionLimit { position, .. }
            | Self::Output { position, .. } => *position,
        }
    }
}
