use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, linalg::core::Matrix, value::array::ArrayValue},
};

fn width(rows: &[Vec<f64>]) -> usize {
    rows.first().map_or(0, Vec::len)
}

/// Multiplies an `m×n` matrix by an `n`-element vector.
///
/// The result is a column vector with `m` elements.
///
/// # Errors
/// Returns `RuntimeError::DimensionMismatch` when the matrix width differs
/// from the vector length.
pub fn matrix_vector(matrix: &[Vec<f64>], vector: &[f64], line: usize) -> EvalResult<ArrayValue> {
    let (rows, cols) = (matrix.len(), width(matrix));
    if cols != vector.len() {
        return Err(RuntimeError::DimensionMismatch { details: format!("Matrix-vector multiplication dimension mismatch: {rows}x{cols} matrix cannot multiply {}x1 vector",
                                                                      vector.len()),
                                                     line });
    }
    let elements = matrix.iter()
                         .map(|row| row.iter().zip(vector).map(|(a, b)| a * b).sum())
                         .collect();
    Ok(ArrayValue::column(elements))
}

/// Multiplies a `1×n` row vector by an `n×p` matrix.
///
/// The result is a row vector with `p` elements.
///
/// # Errors
/// Returns `RuntimeError::DimensionMismatch` when the vector length differs
/// from the matrix height.
pub fn vector_matrix(vector: &[f64], matrix: &[Vec<f64>], line: usize) -> EvalResult<ArrayValue> {
    let (rows, cols) = (matrix.len(), width(matrix));
    if vector.len() != rows {
        return Err(RuntimeError::DimensionMismatch { details: format!("Vector-matrix multiplication dimension mismatch: 1x{} vector cannot multiply {rows}x{cols} matrix",
                                                                      vector.len()),
                                                     line });
    }
    let elements = (0..cols).map(|j| vector.iter().zip(matrix).map(|(v, row)| v * row[j]).sum())
                            .collect();
    Ok(ArrayValue::row(elements))
}

/// Computes the dot product of two equally long vectors.
///
/// # Example
/// ```
/// use madola::interpreter::linalg::product::dot;
///
/// assert_eq!(dot(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], 1).unwrap(), 32.0);
/// assert!(dot(&[1.0], &[1.0, 2.0], 1).is_err());
/// ```
pub fn dot(a: &[f64], b: &[f64], line: usize) -> EvalResult<f64> {
    if a.len() != b.len() {
        return Err(RuntimeError::DimensionMismatch { details: format!("Dot product dimension mismatch: vectors must have same size ({} vs {})",
                                                                      a.len(),
                                                                      b.len()),
                                                     line });
    }
    Ok(a.iter().zip(b).map(|(x, y)| x * y).sum())
}

/// Multiplies an `m×n` matrix by an `n×p` matrix.
///
/// # Example
/// ```
/// use madola::interpreter::linalg::product::matrix_matrix;
///
/// let a = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
/// let b = vec![vec![5.0, 6.0], vec![7.0, 8.0]];
/// assert_eq!(matrix_matrix(&a, &b, 1).unwrap(),
///            vec![vec![19.0, 22.0], vec![43.0, 50.0]]);
/// ```
pub fn matrix_matrix(a: &[Vec<f64>], b: &[Vec<f64>], line: usize) -> EvalResult<Matrix> {
    let (m, n) = (a.len(), width(a));
    let (n2, p) = (b.len(), width(b));
    if n != n2 {
        return Err(RuntimeError::DimensionMismatch { details: format!("Matrix multiplication dimension mismatch: {m}x{n} matrix cannot multiply {n2}x{p} matrix"),
                                                     line });
    }
    Ok(a.iter()
        .map(|row| (0..p).map(|j| (0..n).map(|k| row[k] * b[k][j]).sum()).collect())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_times_vector_is_column() {
        let m = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        let v = matrix_vector(&m, &[1.0, 1.0], 1).unwrap();
        assert_eq!(v, ArrayValue::column(vec![3.0, 7.0]));
    }

    #[test]
    fn row_times_matrix_is_row() {
        let m = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        let v = vector_matrix(&[1.0, 1.0], &m, 1).unwrap();
        assert_eq!(v, ArrayValue::row(vec![4.0, 6.0]));
    }

    #[test]
    fn mismatched_shapes_cite_both_sides() {
        let m = vec![vec![1.0, 2.0, 3.0]];
        let err = matrix_vector(&m, &[1.0, 2.0], 4).unwrap_err();
        assert_eq!(err.to_string(),
                   "Error on line 4: Matrix-vector multiplication dimension mismatch: 1x3 matrix cannot multiply 2x1 vector");
    }
}
