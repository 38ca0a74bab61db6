use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::{binary::matmul::array_product, core::EvalResult},
        value::{array::ArrayValue, core::Value},
    },
};

fn unsupported(op: BinaryOperator, line: usize) -> RuntimeError {
    RuntimeError::TypeMismatch { details: format!("Operator {op} not supported for arrays"),
                                 line }
}

/// Applies `array op scalar` to every element.
///
/// Supports `+`, `-`, `*`, `/` and `^`. The result keeps the array's shape.
///
/// # Errors
/// - `DivisionByZero` when dividing by a zero scalar.
/// - `TypeMismatch` for any other operator.
///
/// # Example
/// ```
/// use madola::{
///     ast::BinaryOperator,
///     interpreter::{
///         evaluator::binary::array::array_scalar,
///         value::{array::ArrayValue, core::Value},
///     },
/// };
///
/// let v = ArrayValue::column(vec![1.0, 2.0]);
/// assert_eq!(array_scalar(BinaryOperator::Pow, &v, 2.0, 1).unwrap(),
///            Value::Array(ArrayValue::column(vec![1.0, 4.0])));
/// assert!(array_scalar(BinaryOperator::Div, &v, 0.0, 1).is_err());
/// ```
pub fn array_scalar(op: BinaryOperator, array: &ArrayValue, scalar: f64, line: usize) -> EvalResult<Value> {
    let result = match op {
        BinaryOperator::Add => array.map(|v| v + scalar),
        BinaryOperator::Sub => array.map(|v| v - scalar),
        BinaryOperator::Mul => array.map(|v| v * scalar),
        BinaryOperator::Div => {
            if scalar == 0.0 {
                return Err(RuntimeError::DivisionByZero { line });
            }
            array.map(|v| v / scalar)
        },
        BinaryOperator::Pow => array.map(|v| v.powf(scalar)),
        _ => return Err(unsupported(op, line)),
    };
    Ok(Value::Array(result))
}

/// Applies `scalar op array` to every element.
///
/// # Errors
/// - `DivisionByZero` when any element is zero in a division.
/// - `TypeMismatch` for operators other than `+`, `-`, `*`, `/` and `^`.
pub fn scalar_array(op: BinaryOperator, scalar: f64, array: &ArrayValue, line: usize) -> EvalResult<Value> {
    let result = match op {
        BinaryOperator::Add => array.map(|v| scalar + v),
        BinaryOperator::Sub => array.map(|v| scalar - v),
        BinaryOperator::Mul => array.map(|v| scalar * v),
        BinaryOperator::Div => array.try_map(|v| {
                                        if v == 0.0 {
                                            Err(RuntimeError::DivisionByZero { line })
                                        } else {
                                            Ok(scalar / v)
                                        }
                                    })?,
        BinaryOperator::Pow => array.map(|v| scalar.powf(v)),
        _ => return Err(unsupported(op, line)),
    };
    Ok(Value::Array(result))
}

/// Combines two arrays.
///
/// `*` between two arrays where either is a matrix, or between a row and a
/// column vector, is a product (see [`array_product`]). Everything else is
/// elementwise and requires both arrays to hold the same number of
/// elements; the result takes the left operand's shape.
///
/// # Errors
/// - `DimensionMismatch` for differing sizes or non-conformal products.
/// - `DivisionByZero` when dividing by a zero element.
/// - `TypeMismatch` for operators other than `+`, `-`, `*`, `/` and `^`.
pub fn array_array(op: BinaryOperator, left: &ArrayValue, right: &ArrayValue, line: usize) -> EvalResult<Value> {
    let products_only = op == BinaryOperator::Mul && (left.is_matrix() || right.is_matrix());
    if !products_only && left.element_count() != right.element_count() {
        return Err(RuntimeError::DimensionMismatch { details: format!("Array size mismatch for element-wise operation: {} vs {}",
                                                                      left.element_count(),
                                                                      right.element_count()),
                                                     line });
    }

    let result = match op {
        BinaryOperator::Mul => return array_product(left, right, line),
        BinaryOperator::Add => left.try_zip(right, |a, b| Ok::<_, RuntimeError>(a + b))?,
        BinaryOperator::Sub => left.try_zip(right, |a, b| Ok::<_, RuntimeError>(a - b))?,
        BinaryOperator::Div => left.try_zip(right, |a, b| {
                                       if b == 0.0 {
                                           Err(RuntimeError::DivisionByZero { line })
                                       } else {
                                           Ok(a / b)
                                       }
                                   })?,
        BinaryOperator::Pow => left.try_zip(right, |a, b| Ok::<_, RuntimeError>(a.powf(b)))?,
        _ => return Err(unsupported(op, line)),
    };
    Ok(Value::Array(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn elementwise_sizes_must_match() {
        let err = array_array(BinaryOperator::Add,
                              &ArrayValue::row(vec![1.0, 2.0]),
                              &ArrayValue::row(vec![1.0]),
                              2).unwrap_err();
        assert_eq!(err.to_string(),
                   "Error on line 2: Array size mismatch for element-wise operation: 2 vs 1");
    }

    #[test]
    fn scalar_divided_by_array_with_zero() {
        let err = scalar_array(BinaryOperator::Div, 1.0, &ArrayValue::row(vec![1.0, 0.0]), 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DivisionByZero);
    }

    #[test]
    fn matrices_add_elementwise() {
        let m = ArrayValue::Matrix(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let v = array_array(BinaryOperator::Sub, &m, &m, 1).unwrap();
        assert_eq!(v, Value::Array(ArrayValue::Matrix(vec![vec![0.0, 0.0], vec![0.0, 0.0]])));
    }

    #[test]
    fn comparison_on_arrays_is_rejected() {
        let v = ArrayValue::row(vec![1.0]);
        let err = array_array(BinaryOperator::Less, &v, &v, 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }
}
