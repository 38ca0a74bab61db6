use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        linalg::{
            core::{Matrix, identity, require_square},
            determinant::determinant,
        },
    },
};

/// Determinants and pivots below this magnitude count as zero.
const SINGULAR_EPSILON: f64 = 1e-12;

/// Inverts a square matrix.
///
/// Orders 1 and 2 use the closed form. Larger matrices are reduced by
/// Gauss-Jordan elimination on `[A | I]` with partial pivoting.
///
/// # Errors
/// - Empty or non-square input.
/// - `RuntimeError::Singular` when `|det(A)| < 1e-12` or a pivot vanishes.
///
/// # Example
/// ```
/// use madola::interpreter::linalg::inverse::inverse;
///
/// let m = vec![vec![4.0, 7.0], vec![2.0, 6.0]];
/// let inv = inverse(&m, 1).unwrap();
/// assert!((inv[0][0] - 0.6).abs() < 1e-12);
/// assert!((inv[1][0] + 0.2).abs() < 1e-12);
///
/// assert!(inverse(&[vec![1.0, 2.0], vec![2.0, 4.0]], 1).is_err());
/// ```
pub fn inverse(rows: &[Vec<f64>], line: usize) -> EvalResult<Matrix> {
    let n = require_square(rows, "Inv", "inverse", line)?;
    let det = determinant(rows, line)?;
    if det.abs() < SINGULAR_EPSILON {
        return Err(RuntimeError::Singular { line });
    }

    match n {
        1 => Ok(vec![vec![1.0 / rows[0][0]]]),
        2 => {
            let (a, b, c, d) = (rows[0][0], rows[0][1], rows[1][0], rows[1][1]);
            Ok(vec![vec![d / det, -b / det], vec![-c / det, a / det]])
        },
        _ => gauss_jordan(rows, line),
    }
}

fn gauss_jordan(rows: &[Vec<f64>], line: usize) -> EvalResult<Matrix> {
    let n = rows.len();
    let mut augmented: Matrix = rows.iter()
                                    .zip(identity(n))
                                    .map(|(row, id)| row.iter().copied().chain(id).collect())
                                    .collect();

    for i in 0..n {
        let pivot_row = (i..n).fold(i, |best, k| {
                                  if augmented[k][i].abs() > augmented[best][i].abs() {
                                      k
                                  } else {
                                      best
                                  }
                              });
        augmented.swap(i, pivot_row);

        let pivot = augmented[i][i];
        if pivot.abs() < SINGULAR_EPSILON {
            return Err(RuntimeError::Singular { line });
        }
        for value in &mut augmented[i] {
            *value /= pivot;
        }

        let pivot_values = augmented[i].clone();
        for (k, row) in augmented.iter_mut().enumerate() {
            if k == i {
                continue;
            }
            let factor = row[i];
            for (value, p) in row.iter_mut().zip(&pivot_values) {
                *value -= factor * p;
            }
        }
    }

    Ok(augmented.into_iter().map(|row| row[n..].to_vec()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorKind, interpreter::linalg::product::matrix_matrix};

    #[test]
    fn three_by_three_round_trips_to_identity() {
        let m = vec![vec![2.0, -1.0, 0.0], vec![-1.0, 2.0, -1.0], vec![0.0, -1.0, 2.0]];
        let inv = inverse(&m, 1).unwrap();
        let product = matrix_matrix(&m, &inv, 1).unwrap();
        for (i, row) in product.iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((value - expected).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn singular_three_by_three() {
        let m = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0], vec![7.0, 8.0, 9.0]];
        assert_eq!(inverse(&m, 1).unwrap_err().kind(), ErrorKind::Singular);
    }
}
