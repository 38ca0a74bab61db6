//! # madola
//!
//! madola is the interpreter core of MADOLA, a language for engineering
//! calculations. It parses and executes programs over numbers, strings,
//! complex numbers, quantities with units, vectors and matrices, and records
//! the printed output and the graphs and tables a program asks for.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    ast::Program,
    config::InterpreterConfig,
    error::ParseError,
    interpreter::{evaluator::core::Interpreter, parser},
};

/// Defines the structure of parsed programs.
///
/// This module declares the `Expr` and `Statement` enums and the function
/// declarations that represent a program as a tree. The tree is built by the
/// parser and walked by the evaluator and the executor.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source lines to every node for error reporting.
pub mod ast;
/// Interpreter settings: call-depth limit and module search path.
pub mod config;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing, parsing,
/// or running a program. Every error carries the line it was raised on.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, runtime).
/// - Renders messages as `Error on line N: ...`.
/// - Classifies runtime errors by `ErrorKind`.
pub mod error;
/// Orchestrates the entire process of program execution.
///
/// This module ties together lexing, parsing, evaluation, statement
/// execution, units, linear algebra and value representations into a
/// complete runtime for MADOLA programs.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, executor.
/// - Manages scopes, function tables and imports.
/// - Collects output lines and graph and table records.
pub mod interpreter;
/// General utilities for safe numeric conversion and number formatting.
///
/// # Responsibilities
/// - Safely convert between `f64`, `i32` and `usize` without silent data loss.
/// - Format numbers the way printed output shows them.
pub mod util;

pub use interpreter::program::EvaluationResult;

/// Parses MADOLA source into a program.
///
/// # Errors
/// Returns the first lexing or syntax error.
///
/// # Example
/// ```
/// use madola::{ast::Statement, parse_program};
///
/// let program = parse_program("@version 0.01\nprint(1);").unwrap();
/// assert!(matches!(program.statements[0], Statement::Version { .. }));
/// assert!(parse_program("x := ;").is_err());
/// ```
pub fn parse_program(source: &str) -> Result<Program, ParseError> {
    parser::core::parse_program(source)
}

/// Parses and runs `source` with the default configuration.
///
/// # Example
/// ```
/// let result = madola::evaluate("@version 0.01\nx := 3 m;\nprint(x * 2);");
/// assert!(result.success);
/// assert_eq!(result.outputs, vec!["6 m"]);
/// ```
#[must_use]
pub fn evaluate(source: &str) -> EvaluationResult {
    evaluate_with_config(source, InterpreterConfig::default())
}

/// Parses and runs `source` with `config`.
///
/// A parse error produces a failed result carrying the parse error's
/// message and no output.
#[must_use]
pub fn evaluate_with_config(source: &str, config: InterpreterConfig) -> EvaluationResult {
    match parse_program(source) {
        Ok(program) => Interpreter::new(config).run(&program),
        Err(err) => EvaluationResult::parse_failure(err.to_string()),
    }
}

/// Runs `source` and returns the evaluation result.
///
/// With `auto_print` set, each output line is printed to stdout.
///
/// # Errors
/// Returns an error if parsing fails or any statement fails at runtime.
///
/// # Examples
/// ```
/// use madola::get_result;
///
/// let res = get_result("@version 0.01\nresult := 2 + 2;", false);
/// assert!(res.is_ok());
///
/// // `x` is not defined.
/// let res = get_result("@version 0.01\ny := x + 1;", false);
/// assert!(res.is_err());
/// ```
pub fn get_result(source: &str, auto_print: bool) -> Result<EvaluationResult, Box<dyn std::error::Error>> {
    let program = parse_program(source)?;
    let result = Interpreter::new(InterpreterConfig::from_env()).run(&program);

    if auto_print {
        for line in &result.outputs {
            println!("{line}");
        }
    }

    match &result.error {
        Some(message) => Err(message.clone().into()),
        None => Ok(result),
    }
}
