/// Numeric arrays.
///
/// Defines `ArrayValue`, which is either a matrix stored row by row or a flat
/// vector flagged as a row or a column. Provides shape queries, elementwise
/// mapping and the printed form of arrays.
pub mod array;
/// Complex number support.
///
/// Defines the `ComplexNumber` type used for arithmetic with real and imaginary
/// parts. Includes the four arithmetic operators, a checked division and the
/// printed `a + bi` form.
pub mod complex;
/// The `Value` enum and conversions between value kinds.
pub mod core;
/// Quantities with units.
///
/// Defines `UnitValue`, a number paired with a unit string, and the unit-aware
/// arithmetic used when either operand carries a unit.
pub mod quantity;
