/// Numeric conversion and formatting helpers.
///
/// This module provides safe conversions between floating-point and integer
/// types and the printing rules MADOLA uses for numbers, so every component
/// formats values the same way.
///
/// Conversions that can lose information return a `Result`, which is `Ok` only
/// if the conversion is lossless and in range.
pub mod num;
/// Stack growth for deeply nested evaluation.
pub mod stack;
