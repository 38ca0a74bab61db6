/// Function call dispatch.
///
/// Holds the builtin table and resolves a call through builtins, host
/// functions, piecewise functions and user functions, in that order.
pub mod core;

/// Built-in scalar functions: `time`, `sqrt`, `sin`, `cos` and `tan`.
pub mod builtin;

/// The `math.*` namespace, including `math.summation`.
pub mod math;

/// Matrix methods such as `.det()` and `.eigenvalues()`.
pub mod method;

/// Built-ins that inspect their argument expressions: `type`, `graph`,
/// `graph_3d` and `table`.
pub mod records;
