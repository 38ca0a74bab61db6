/// Variable scopes, the function table and function aliases.
///
/// A stack of frames whose bottom frame is global. Lookups check the
/// innermost frame, then the global one.
pub mod environment;
/// The evaluator module computes the values of expressions.
///
/// The evaluator walks expression nodes, applies unary and binary operators
/// across every value kind, and dispatches function, method, piecewise and
/// record-producing calls.
///
/// # Responsibilities
/// - Evaluates expressions, performing all supported operations.
/// - Resolves calls to built-ins, host functions, piecewise and user
///   functions.
/// - Reports runtime errors such as division by zero or incompatible units.
pub mod evaluator;
/// Statement execution.
///
/// Runs assignments, declarations, output, control flow and imports, and
/// propagates `return` and `break` through blocks.
pub mod executor;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens, each
/// corresponding to a language element such as a number, a unit-suffixed
/// number, an identifier, an operator, a keyword or a decorator.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with their line.
/// - Skips whitespace and comments while counting lines.
pub mod lexer;
/// Matrix algorithms: products, determinants, inverses and eigen
/// decomposition.
pub mod linalg;
/// The parser module builds the abstract syntax tree from tokens.
///
/// # Responsibilities
/// - Converts tokens into expression and statement nodes.
/// - Validates grammar, reporting errors with line information.
pub mod parser;
/// Whole-program execution and the records a run produces.
///
/// Defines `EvaluationResult`, the graph and table records and the version
/// check that guards every program.
pub mod program;
/// Unit strings: the predefined units, simplification and compatibility.
pub mod units;
/// The value module defines the runtime data types for evaluation.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported value variants.
/// - Implements the printed form of every value.
/// - Provides conversions between numbers, quantities and complex numbers.
pub mod value;
