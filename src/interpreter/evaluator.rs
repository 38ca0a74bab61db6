/// Binary operator evaluation logic.
///
/// Resolves the operand kinds in a fixed order: string concatenation,
/// complex arithmetic, array broadcasting and products, plain numbers and
/// finally unit-carrying quantities.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements negation, unary plus and logical NOT.
pub mod unary;

/// Core evaluation logic and interpreter state.
///
/// Contains the `Interpreter` type, the `EvalResult` alias and the
/// expression dispatcher.
pub mod core;

/// Utility functions for evaluation.
///
/// Arity and bound checks, array literals, element access and temporary
/// substitutions.
pub mod utils;

/// Function evaluation.
///
/// Handles built-in, host, piecewise and user-defined calls, the `math`
/// namespace, matrix methods and the record-producing built-ins.
pub mod function;

/// Piecewise expressions and piecewise function calls.
pub mod piecewise;
