/// Statement dispatch and the `ControlFlow` signal.
///
/// Runs blocks, conditionals, output statements, declarations and
/// decorated statements, and propagates `return` and `break` upward.
pub mod core;

/// Variable and array element assignment.
pub mod assignment;

/// `for` and `while` loops.
pub mod loops;

/// File imports.
///
/// Resolves a module on the search path, runs it in a separate interpreter
/// and copies the requested functions back.
pub mod import;
