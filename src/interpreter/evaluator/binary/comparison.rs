use crate::ast::BinaryOperator;

/// Evaluates a comparison operator on two magnitudes.
///
/// Non-comparison operators yield `false`.
///
/// # Example
/// ```
/// use madola::{ast::BinaryOperator, interpreter::evaluator::binary::comparison::compare};
///
/// assert!(compare(BinaryOperator::LessEqual, 2.0, 2.0));
/// assert!(!compare(BinaryOperator::NotEqual, 2.0, 2.0));
/// ```
#[must_use]
#[allow(clippy::float_cmp)]
pub fn compare(op: BinaryOperator, a: f64, b: f64) -> bool {
    match op {
        BinaryOperator::Less => a < b,
        BinaryOperator::Greater => a > b,
        BinaryOperator::LessEqual => a <= b,
        BinaryOperator::GreaterEqual => a >= b,
        BinaryOperator::Equal => a == b,
        BinaryOperator::NotEqual => a != b,
        _ => false,
    }
}

/// Evaluates `&&` or `||` where nonzero magnitudes are true.
#[must_use]
pub fn logical(op: BinaryOperator, a: f64, b: f64) -> bool {
    match op {
        BinaryOperator::And => a != 0.0 && b != 0.0,
        BinaryOperator::Or => a != 0.0 || b != 0.0,
        _ => false,
    }
}
