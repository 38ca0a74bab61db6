/// Entry points: tokenizing, whole programs and full expressions.
///
/// Also holds the `ParseResult` alias shared by every parsing routine.
pub mod core;

/// Prefix operators, postfix method calls and primary expressions.
///
/// Handles literals (including unit and imaginary literals), identifiers,
/// calls, element access, grouping, array literals and piecewise expressions.
pub mod unary;

/// Binary operator parsing.
///
/// One function per precedence level, from logical OR down to
/// exponentiation.
pub mod binary;

/// Block parsing.
///
/// Parses brace-delimited statement lists and single-statement bodies.
pub mod block;

/// Helper routines shared by the parsers.
pub mod utils;

/// Statement parsing.
///
/// Implements assignments, declarations, control flow, imports and
/// decorators.
pub mod statement;
