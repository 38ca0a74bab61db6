use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        linalg::product::{dot, matrix_matrix, matrix_vector, vector_matrix},
        value::{array::ArrayValue, core::Value},
    },
};

/// Evaluates `left * right` for two arrays.
///
/// The meaning of `*` follows the operands' shapes:
/// - matrix · matrix is the matrix product,
/// - matrix · column vector is a column vector,
/// - row vector · matrix is a row vector,
/// - row vector · column vector is the dot product, a scalar,
/// - any other pair of vectors multiplies elementwise.
///
/// # Errors
/// `RuntimeError::DimensionMismatch` for shapes that do not conform.
///
/// # Example
/// ```
/// use madola::interpreter::{
///     evaluator::binary::matmul::array_product,
///     value::{array::ArrayValue, core::Value},
/// };
///
/// let row = ArrayValue::row(vec![1.0, 2.0, 3.0]);
/// let col = ArrayValue::column(vec![4.0, 5.0, 6.0]);
/// assert_eq!(array_product(&row, &col, 1).unwrap(), Value::Number(32.0));
/// ```
pub fn array_product(left: &ArrayValue, right: &ArrayValue, line: usize) -> EvalResult<Value> {
    use ArrayValue::{Matrix, Vector};

    let product = match (left, right) {
        (Matrix(a), Matrix(b)) => Matrix(matrix_matrix(a, b, line)?),
        (Matrix(a), Vector { elements, column: true }) => matrix_vector(a, elements, line)?,
        (Vector { elements, column: false }, Matrix(b)) => vector_matrix(elements, b, line)?,
        (Vector { elements: a, column: false }, Vector { elements: b, column: true }) => {
            return Ok(Value::Number(dot(a, b, line)?));
        },
        (Vector { .. }, Vector { .. }) => left.try_zip(right, |a, b| Ok::<_, RuntimeError>(a * b))?,
        _ => {
            let (lr, lc) = left.shape();
            let (rr, rc) = right.shape();
            return Err(RuntimeError::DimensionMismatch { details: format!("Cannot multiply {lr}x{lc} array by {rr}x{rc} array"),
                                                         line });
        },
    };
    Ok(Value::Array(product))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_times_column() {
        let m = ArrayValue::Matrix(vec![vec![1.0, 0.0], vec![0.0, 2.0]]);
        let v = ArrayValue::column(vec![3.0, 4.0]);
        assert_eq!(array_product(&m, &v, 1).unwrap(),
                   Value::Array(ArrayValue::column(vec![3.0, 8.0])));
    }

    #[test]
    fn vectors_of_same_orientation_multiply_elementwise() {
        let a = ArrayValue::row(vec![1.0, 2.0]);
        let b = ArrayValue::row(vec![3.0, 4.0]);
        assert_eq!(array_product(&a, &b, 1).unwrap(),
                   Value::Array(ArrayValue::row(vec![3.0, 8.0])));
    }

    #[test]
    fn matrix_times_row_is_rejected() {
        let m = ArrayValue::Matrix(vec![vec![1.0, 0.0], vec![0.0, 2.0]]);
        let v = ArrayValue::row(vec![3.0, 4.0]);
        let err = array_product(&m, &v, 5).unwrap_err();
        assert_eq!(err.to_string(), "Error on line 5: Cannot multiply 2x2 array by 1x2 array");
    }
}
