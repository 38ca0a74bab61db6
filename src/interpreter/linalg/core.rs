use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// A dense matrix stored row by row.
pub type Matrix = Vec<Vec<f64>>;

/// Checks that `rows` forms a non-empty square matrix and returns its order.
///
/// `op` names the operation in the error message (`Det`, `Inv`, ...) and
/// `what` names the computed quantity (`determinant`, `inverse`, ...).
///
/// # Errors
/// - `InvalidArgument` for an empty matrix.
/// - `DimensionMismatch` when the matrix is not square.
///
/// # Example
/// ```
/// use madola::interpreter::linalg::core::require_square;
///
/// let m = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
/// assert_eq!(require_square(&m, "Det", "determinant", 1).unwrap(), 2);
///
/// let wide = vec![vec![1.0, 2.0, 3.0]];
/// let err = require_square(&wide, "Det", "determinant", 1).unwrap_err();
/// assert_eq!(err.to_string(), "Error on line 1: Det() requires a square matrix, got 1x3");
/// ```
pub fn require_square(rows: &[Vec<f64>], op: &str, what: &str, line: usize) -> EvalResult<usize> {
    let n = rows.len();
    if n == 0 {
        return Err(RuntimeError::InvalidArgument { details: format!("Cannot compute {what} of empty matrix"),
                                                   line });
    }
    let m = rows[0].len();
    if n != m || rows.iter().any(|row| row.len() != m) {
        return Err(RuntimeError::DimensionMismatch { details: format!("{op}() requires a square matrix, got {n}x{m}"),
                                                     line });
    }
    Ok(n)
}

/// Sums the diagonal of a square matrix.
pub fn trace(rows: &[Vec<f64>], line: usize) -> EvalResult<f64> {
    let n = require_square(rows, "Tr", "trace", line)?;
    Ok((0..n).map(|i| rows[i][i]).sum())
}

/// Swaps rows and columns. An empty matrix stays empty.
///
/// # Example
/// ```
/// use madola::interpreter::linalg::core::transpose;
///
/// let m = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]];
/// assert_eq!(transpose(&m), vec![vec![1.0, 4.0], vec![2.0, 5.0], vec![3.0, 6.0]]);
/// assert_eq!(transpose(&transpose(&m)), m);
/// ```
#[must_use]
pub fn transpose(rows: &[Vec<f64>]) -> Matrix {
    let cols = rows.first().map_or(0, Vec::len);
    (0..cols).map(|j| rows.iter().map(|row| row[j]).collect())
             .collect()
}

/// Builds the `n×n` identity matrix.
#[must_use]
pub fn identity(n: usize) -> Matrix {
    (0..n).map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
          .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_of_square_matrix() {
        let m = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        assert_eq!(trace(&m, 1).unwrap(), 5.0);
    }

    #[test]
    fn trace_rejects_empty_and_ragged() {
        assert!(trace(&[], 1).is_err());
        let ragged = vec![vec![1.0, 2.0], vec![3.0]];
        assert!(trace(&ragged, 1).is_err());
    }

    #[test]
    fn transpose_of_empty_is_empty() {
        assert!(transpose(&[]).is_empty());
    }

    #[test]
    fn identity_has_unit_diagonal() {
        assert_eq!(identity(2), vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    }
}
