use std::{fmt, rc::Rc};

/// A location in the source text.
///
/// Both fields are 1-based. Every token, AST node and error carries one so
/// diagnostics can point at the offending column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Position {
    /// The source line.
    pub line:   usize,
    /// The column within `line`, counted in characters.
    pub column: usize,
}

impl Position {
    /// Creates a new position.
    ///
    /// # Example
    /// ```
    /// use foolang::ast::Position;
    ///
    /// let position = Position::new(3, 7);
    /// assert_eq!(position.line, 3);
    /// assert_eq!(position.column, 7);
    /// ```
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Represents a literal value in the language.
///
/// `LiteralValue` covers the constants that can appear directly in source
/// code. List literals are expressions of their own since their items are
/// evaluated.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A 64-bit signed integer literal.
    Integer(i64),
    /// A 64-bit floating-point literal.
    Float(f64),
    /// A double-quoted string literal, escapes already decoded.
    String(String),
    /// `True` or `False`.
    Boolean(bool),
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

/// An abstract syntax tree (AST) node representing an expression.
///
/// Expressions always produce a value when evaluated, with the single
/// exception of a call to a function that finishes without `return`.
/// Children are owned by their parent node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal constant.
    Literal {
        /// The constant value.
        value:    LiteralValue,
        /// Position of the literal.
        position: Position,
    },
    /// Reference to a bound name.
    Lookup {
        /// Name of the variable.
        name:     String,
        /// Position of the identifier.
        position: Position,
    },
    /// A list literal such as `[1, 2, 3]`.
    List {
        /// Item expressions, evaluated left to right.
        items:    Vec<Self>,
        /// Position of the opening bracket.
        position: Position,
    },
    /// Indexing into a list or string, `target[index]`.
    Index {
        /// The indexed expression.
        target:   Box<Self>,
        /// The index expression.
        index:    Box<Self>,
        /// Position of the opening bracket.
        position: Position,
    },
    /// `+ - * / // % ^`
    Arithmetic {
        /// Left operand.
        left:     Box<Self>,
        /// The operator.
        op:       ArithmeticOperator,
        /// Right operand.
        right:    Box<Self>,
        /// Position of the operator.
        position: Position,
    },
    /// `== != < > <= >=`
    Comparison {
        /// Left operand.
        left:     Box<Self>,
        /// The operator.
        op:       ComparisonOperator,
        /// Right operand.
        right:    Box<Self>,
        /// Position of the operator.
        position: Position,
    },
    /// `and`, `or`. The right operand is only evaluated when needed.
    Logical {
        /// Left operand.
        left:     Box<Self>,
        /// The operator.
        op:       LogicalOperator,
        /// Right operand.
        right:    Box<Self>,
        /// Position of the operator.
        position: Position,
    },
    /// `not x`, `-x`
    Unary {
        /// The operator.
        op:       UnaryOperator,
        /// The operand.
        operand:  Box<Self>,
        /// Position of the operator.
        position: Position,
    },
    /// A call to a user-defined function.
    FunctionCall {
        /// Name of the function.
        name:      String,
        /// Argument expressions, evaluated left to right in the caller's
        /// scope.
        arguments: Vec<Self>,
        /// Position of the function name.
        position:  Position,
    },
    /// The `len(x)` primitive.
    Length {
        /// The measured expression.
        operand:  Box<Self>,
        /// Position of `len`.
        position: Position,
    },
}

impl Expr {
    /// Gets the source position from `self`.
    ///
    /// ## Example
    /// ```
    /// use foolang::ast::{Expr, Position};
    ///
    /// let expr = Expr::Lookup { name:     "x".to_string(),
    ///                           position: Position::new(5, 2), };
    ///
    /// assert_eq!(expr.position(), Position::new(5, 2));
    /// ```
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Literal { position, .. }
            | Self::Lookup { position, .. }
            | Self::List { position, .. }
            | Self::Index { position, .. }
            | Self::Arithmetic { position, .. }
            | Self::Comparison { position, .. }
            | Self::Logical { position, .. }
            | Self::Unary { position, .. }
            | Self::FunctionCall { position, .. }
            | Self::Length { position, .. } => *position,
        }
    }

    /// Short human readable description used in diagnostics, e.g. for an
    /// invalid assignment target.
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::Literal { .. } => "a literal",
            Self::Lookup { .. } => "a name",
            Self::List { .. } => "a list literal",
            Self::Index { .. } => "an index expression",
            Self::Arithmetic { .. } => "an arithmetic expression",
            Self::Comparison { .. } => "a comparison",
            Self::Logical { .. } => "a logical expression",
            Self::Unary { .. } => "a unary expression",
            Self::FunctionCall { .. } => "a function call",
            Self::Length { .. } => "a length expression",
        }
    }
}

/// An ordered sequence of statements.
///
/// The unit of execution for blocks and for whole programs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatementList {
    /// The statements, executed in order.
    pub statements: Vec<Statement>,
    /// Position of the first token of the list.
    pub position:   Position,
}

/// A parsed program is the top-level statement list.
pub type Program = StatementList;

/// Represents a user-defined function definition.
///
/// Definitions are shared between the AST and the scope that binds them.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// The name of the function.
    pub name:     String,
    /// The parameter names, bound positionally.
    pub params:   Vec<String>,
    /// The function body.
    pub body:     StatementList,
    /// Position of the `function` keyword.
    pub position: Position,
}

/// One `if (cond) { ... }` arm of a conditional chain.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalBranch {
    /// The guard.
    pub condition: Expr,
    /// Executed when `condition` is truthy.
    pub body:      StatementList,
    /// Position of the `if` keyword.
    pub position:  Position,
}

/// Represents a statement.
///
/// Statements are terminated by `;` in source, including compound ones.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `name = value`
    Assign {
        /// The bound name.
        name:     String,
        /// The assigned value.
        value:    Expr,
        /// Position of the name.
        position: Position,
    },
    /// `target[index] = value`
    ///
    /// The target is a name optionally followed by further index steps,
    /// e.g. `grid[1][2] = 0`.
    IndexAssign {
        /// The indexed container.
        target:   Expr,
        /// The replaced position.
        index:    Expr,
        /// The new element.
        value:    Expr,
        /// Position of the last opening bracket.
        position: Position,
    },
    /// `print expr`
    Print {
        /// The printed expression.
        expr:     Expr,
        /// Position of `print`.
        position: Position,
    },
    /// `if (..) { .. } else if (..) { .. } else { .. }`
    Conditional {
        /// Branches in declaration order.
        branches: Vec<ConditionalBranch>,
        /// The `else` block, if any.
        fallback: Option<StatementList>,
        /// Position of the first `if`.
        position: Position,
    },
    /// `while (cond) { .. }`
    Loop {
        /// Re-evaluated before every iteration.
        condition: Expr,
        /// The loop body.
        body:      StatementList,
        /// Position of `while`.
        position:  Position,
    },
    /// `function name(params) { .. }`
    Function(Rc<FunctionDef>),
    /// `return expr`
    Return {
        /// The returned expression.
        expr:     Expr,
        /// Position of `return`.
        position: Position,
    },
    /// An expression evaluated as a statement.
    Expression {
        /// The expression to evaluate.
        expr:     Expr,
        /// Position of the expression.
        position: Position,
    },
}

impl Statement {
    /// Gets the source position from `self`.
    #[must_use]
    pub fn position(&self) -> Position {
        match self {
            Self::Assign { position, .. }
            | Self::IndexAssign { position, .. }
            | Self::Print { position, .. }
            | Self::Conditional { position, .. }
            | Self::Loop { position, .. }
            | Self::Return { position, .. }
            | Self::Expression { position, .. } => *position,
            Self::Function(def) => def.position,
        }
    }

    /// The statement's keyword-ish name, used in trace logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Assign { .. } => "assign",
            Self::IndexAssign { .. } => "index-assign",
            Self::Print { .. } => "print",
            Self::Conditional { .. } => "conditional",
            Self::Loop { .. } => "loop",
            Self::Function(_) => "function",
            Self::Return { .. } => "return",
            Self::Expression { .. } => "expression",
        }
    }
}

/// Arithmetic operators.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ArithmeticOperator {
    /// Addition and concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// True division (`/`)
    Div,
    /// Floor division (`//`)
    FloorDiv,
    /// Floored modulo (`%`)
    Mod,
    /// Exponentiation (`^`)
    Pow,
}

/// Comparison operators.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ComparisonOperator {
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
}

impl ComparisonOperator {
    /// Returns `true` for the ordering operators, which lists do not support.
    ///
    /// # Example
    /// ```
    /// use foolang::ast::ComparisonOperator;
    ///
    /// assert!(ComparisonOperator::Less.is_ordering());
    /// assert!(!ComparisonOperator::Equal.is_ordering());
    /// ```
    #[must_use]
    pub const fn is_ordering(self) -> bool {
        !matches!(self, Self::Equal | Self::NotEqual)
    }
}

/// Short-circuiting logical operators.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LogicalOperator {
    /// Logical and (`and`)
    And,
    /// Logical or (`or`)
    Or,
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
    /// Logical NOT (e.g. `not x`).
    Not,
}

impl fmt::Display for ArithmeticOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::FloorDiv => "//",
            Self::Mod => "%",
            Self::Pow => "^",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => write!(f, "and"),
            Self::Or => write!(f, "or"),
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negate => write!(f, "-"),
            Self::Not => write!(f, "not"),
        }
    }
}
