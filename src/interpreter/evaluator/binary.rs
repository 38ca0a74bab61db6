/// Operand-kind dispatch for binary operators.
pub mod core;

/// Arithmetic on numbers, quantities and complex numbers, plus string
/// concatenation.
pub mod scalar;

/// Elementwise operations between arrays and scalars or equally sized arrays.
pub mod array;

/// The `*` operator between two arrays: matrix products, dot products and
/// elementwise multiplication.
pub mod matmul;

/// Comparison and logical operators on magnitudes.
pub mod comparison;
