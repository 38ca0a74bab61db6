use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            binary::comparison::{compare, logical},
            core::EvalResult,
        },
        value::{complex::ComplexNumber, core::Value, quantity::UnitValue},
    },
};

/// Joins two values as text. Strings are used raw and everything else is
/// rendered as it would be printed.
pub fn concat(left: &Value, right: &Value) -> Value {
    let text = |value: &Value| match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    Value::String(text(left) + &text(right))
}

/// Applies an operator to two plain numbers.
///
/// Comparisons and logical operators yield `1` or `0`.
///
/// # Errors
/// `DivisionByZero` and `ModuloByZero` for a zero right operand.
///
/// # Example
/// ```
/// use madola::{
///     ast::BinaryOperator,
///     interpreter::{evaluator::binary::scalar::number_op, value::core::Value},
/// };
///
/// assert_eq!(number_op(BinaryOperator::Pow, 2.0, 10.0, 1).unwrap(), Value::Number(1024.0));
/// assert_eq!(number_op(BinaryOperator::Mod, 7.5, 2.0, 1).unwrap(), Value::Number(1.5));
/// assert!(number_op(BinaryOperator::Div, 1.0, 0.0, 1).is_err());
/// ```
pub fn number_op(op: BinaryOperator, a: f64, b: f64, line: usize) -> EvalResult<Value> {
    use BinaryOperator::{Add, And, Div, Mod, Mul, Or, Pow, Sub};

    Ok(match op {
        Add => Value::Number(a + b),
        Sub => Value::Number(a - b),
        Mul => Value::Number(a * b),
        Div => {
            if b == 0.0 {
                return Err(RuntimeError::DivisionByZero { line });
            }
            Value::Number(a / b)
        },
        Mod => {
            if b == 0.0 {
                return Err(RuntimeError::ModuloByZero { line });
            }
            Value::Number(a % b)
        },
        Pow => Value::Number(a.powf(b)),
        And | Or => Value::from(logical(op, a, b)),
        _ => Value::from(compare(op, a, b)),
    })
}

/// Applies an operator with unit checking.
///
/// Both operands are promoted to quantities first; a plain number becomes a
/// dimensionless quantity. A result whose unit cancels out is returned as a
/// plain number.
///
/// # Errors
/// - `TypeMismatch` when an operand is a string or an array.
/// - `DimensionMismatch` for incompatible units in `+`, `-` or a
///   dimensioned exponent.
/// - `DivisionByZero` and `ModuloByZero`.
pub fn quantity_op(op: BinaryOperator, left: &Value, right: &Value, line: usize) -> EvalResult<Value> {
    use BinaryOperator::{Add, And, Div, Mod, Mul, Or, Pow, Sub};

    let l = left.to_quantity(line)?;
    let r = right.to_quantity(line)?;

    let quantity = match op {
        Add => l.add(&r, line)?,
        Sub => l.sub(&r, line)?,
        Mul => l.mul(&r),
        Div => l.div(&r, line)?,
        Mod => l.rem(&r, line)?,
        Pow => l.pow(&r, line)?,
        And | Or => return Ok(Value::from(logical(op, l.value, r.value))),
        _ => {
            let (a, b) = l.comparable(&r);
            return Ok(Value::from(compare(op, a, b)));
        },
    };
    Ok(collapse(quantity))
}

fn collapse(quantity: UnitValue) -> Value {
    if quantity.is_dimensionless() {
        Value::Number(quantity.value)
    } else {
        Value::Quantity(quantity)
    }
}

/// Applies `+`, `-`, `*` or `/` with at least one complex operand.
///
/// A plain number on the other side is promoted with a zero imaginary part.
///
/// # Errors
/// - `Unsupported` for any other operator.
/// - `TypeMismatch` when the other operand is not a number.
/// - `DivisionByZero` when dividing by `0 + 0i`.
pub fn complex_op(op: BinaryOperator, left: &Value, right: &Value, line: usize) -> EvalResult<Value> {
    let promote = |value: &Value| match value {
        Value::Complex(c) => Ok(*c),
        Value::Number(n) => Ok(ComplexNumber::from(*n)),
        other => Err(RuntimeError::TypeMismatch { details: format!("Cannot combine a complex number with {}",
                                                                   other.describe()),
                                                  line }),
    };

    let result = match op {
        BinaryOperator::Add => promote(left)? + promote(right)?,
        BinaryOperator::Sub => promote(left)? - promote(right)?,
        BinaryOperator::Mul => promote(left)? * promote(right)?,
        BinaryOperator::Div => promote(left)?.checked_div(promote(right)?)
                                             .ok_or(RuntimeError::DivisionByZero { line })?,
        _ => {
            return Err(RuntimeError::Unsupported { details: format!("Operator {op} not supported for complex numbers"),
                                                   line });
        },
    };
    Ok(Value::Complex(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn compatible_units_add_in_left_unit() {
        let v = quantity_op(BinaryOperator::Add,
                            &Value::Quantity(UnitValue::new(1.0, "ft")),
                            &Value::Quantity(UnitValue::new(12.0, "in")),
                            1).unwrap();
        let Value::Quantity(q) = v else { panic!("expected a quantity") };
        assert_eq!(q.unit, "ft");
        assert!((q.value - 2.0).abs() < 1e-9);
    }

    #[test]
    fn incompatible_units_do_not_add() {
        let err = quantity_op(BinaryOperator::Add,
                              &Value::Quantity(UnitValue::new(1.0, "m")),
                              &Value::Quantity(UnitValue::new(1.0, "s")),
                              3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DimensionMismatch);
        assert_eq!(err.line(), 3);
    }

    #[test]
    fn comparison_converts_right_operand() {
        let v = quantity_op(BinaryOperator::Greater,
                            &Value::Quantity(UnitValue::new(1.0, "m")),
                            &Value::Quantity(UnitValue::new(50.0, "cm")),
                            1).unwrap();
        assert_eq!(v, Value::Number(1.0));
    }

    #[test]
    fn quantity_division_by_zero() {
        let err = quantity_op(BinaryOperator::Div,
                              &Value::Quantity(UnitValue::new(1.0, "m")),
                              &Value::Number(0.0),
                              1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DivisionByZero);
    }

    #[test]
    fn complex_division_by_zero() {
        let err = complex_op(BinaryOperator::Div,
                             &Value::Complex(ComplexNumber::new(1.0, 1.0)),
                             &Value::Number(0.0),
                             1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DivisionByZero);
    }
}
