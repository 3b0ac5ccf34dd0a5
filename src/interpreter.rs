/// The evaluator module executes the syntax tree.
///
/// The evaluator walks the program statement by statement, evaluates
/// expressions, manages scope frames for function calls and propagates
/// `return` through nested blocks.
///
/// # Responsibilities
/// - Executes statements and evaluates expressions.
/// - Resolves names through the chain of frames.
/// - Reports runtime errors such as division by zero or bad indices.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a sequence of
/// tokens, each corresponding to a meaningful language element such as a
/// number, string, identifier, operator, delimiter or keyword. This is the
/// first stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with line and column.
/// - Decodes numeric and string literals.
/// - Reports illegal characters.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token sequence produced by the lexer and
/// constructs the statement list of a program.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes.
/// - Enforces operator precedence and associativity.
/// - Rejects invalid assignment targets, reserved names and duplicate
///   parameters before anything runs.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// # Responsibilities
/// - Defines the `Value` enum: integers, floats, strings, booleans and lists.
/// - Implements truthiness, numeric conversion and rendering.
pub mod value;
