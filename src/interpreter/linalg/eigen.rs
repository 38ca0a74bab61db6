use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        linalg::core::{Matrix, identity, require_square, transpose},
    },
};

/// Iteration cap for the QR algorithm.
const MAX_QR_ITERATIONS: usize = 1000;
/// The QR iteration stops once the off-diagonal magnitudes sum below this.
const QR_TOLERANCE: f64 = 1e-10;
/// Householder vectors shorter than this are skipped.
const HOUSEHOLDER_EPSILON: f64 = 1e-15;
/// Pivots and coefficients below this are treated as zero during elimination.
const PIVOT_EPSILON: f64 = 1e-10;

/// Computes the real eigenvalues of a square matrix.
///
/// - Order 1 returns the single entry.
/// - Order 2 solves the characteristic polynomial directly.
/// - Larger orders run unshifted QR iteration with Householder reflections
///   and read the diagonal once the matrix has converged. The values come
///   back in iteration order, unsorted.
///
/// # Errors
/// - Empty or non-square input.
/// - `RuntimeError::Unsupported` when a 2×2 matrix has complex eigenvalues.
///
/// # Example
/// ```
/// use madola::interpreter::linalg::eigen::eigenvalues;
///
/// let m = vec![vec![2.0, 0.0], vec![0.0, 3.0]];
/// assert_eq!(eigenvalues(&m, 1).unwrap(), vec![3.0, 2.0]);
///
/// let rotation = vec![vec![0.0, -1.0], vec![1.0, 0.0]];
/// assert!(eigenvalues(&rotation, 1).is_err());
/// ```
pub fn eigenvalues(rows: &[Vec<f64>], line: usize) -> EvalResult<Vec<f64>> {
    let n = require_square(rows, "Eigenvalues", "eigenvalues", line)?;
    match n {
        1 => Ok(vec![rows[0][0]]),
        2 => {
            let (a, b, c, d) = (rows[0][0], rows[0][1], rows[1][0], rows[1][1]);
            let trace = a + d;
            let det = a * d - b * c;
            let discriminant = trace * trace - 4.0 * det;
            if discriminant < 0.0 {
                return Err(RuntimeError::Unsupported { details: "Complex eigenvalues not yet supported".to_string(),
                                                       line });
            }
            let root = discriminant.sqrt();
            Ok(vec![(trace + root) / 2.0, (trace - root) / 2.0])
        },
        _ => Ok(qr_iteration(rows.to_vec())),
    }
}

fn qr_iteration(mut a: Matrix) -> Vec<f64> {
    let n = a.len();
    let mut converged = false;

    for _ in 0..MAX_QR_ITERATIONS {
        let (q, r) = householder_qr(&a);

        let next: Matrix = (0..n).map(|i| {
                                     (0..n).map(|j| (0..n).map(|k| r[i][k] * q[k][j]).sum())
                                           .collect()
                                 })
                                 .collect();

        let off_diagonal: f64 = next.iter()
                                    .enumerate()
                                    .flat_map(|(i, row)| {
                                        row.iter()
                                           .enumerate()
                                           .filter(move |(j, _)| *j != i)
                                           .map(|(_, v)| v.abs())
                                    })
                                    .sum();
        a = next;

        if off_diagonal < QR_TOLERANCE {
            converged = true;
            break;
        }
    }

    if !converged {
        tracing::warn!(order = n, "QR iteration reached {MAX_QR_ITERATIONS} iterations without converging");
    }

    (0..n).map(|i| a[i][i]).collect()
}

/// Factors `a` into `Q·R` with Householder reflections.
fn householder_qr(a: &[Vec<f64>]) -> (Matrix, Matrix) {
    let n = a.len();
    let mut q = identity(n);
    let mut r = a.to_vec();

    for k in 0..n - 1 {
        let mut x: Vec<f64> = (k..n).map(|i| r[i][k]).collect();

        let norm = x.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm < HOUSEHOLDER_EPSILON {
            continue;
        }
        x[0] += if x[0] >= 0.0 { norm } else { -norm };

        let vnorm = x.iter().map(|v| v * v).sum::<f64>().sqrt();
        if vnorm < HOUSEHOLDER_EPSILON {
            continue;
        }
        for v in &mut x {
            *v /= vnorm;
        }

        for j in k..n {
            let dot: f64 = x.iter().enumerate().map(|(i, v)| v * r[k + i][j]).sum();
            for (i, v) in x.iter().enumerate() {
                r[k + i][j] -= 2.0 * dot * v;
            }
        }
        for row in &mut q {
            let dot: f64 = x.iter().enumerate().map(|(i, v)| v * row[k + i]).sum();
            for (i, v) in x.iter().enumerate() {
                row[k + i] -= 2.0 * dot * v;
            }
        }
    }

    (q, r)
}

/// Computes one unit eigenvector per eigenvalue, returned as matrix columns.
///
/// For each eigenvalue `λ`, `A - λI` is reduced by forward elimination with
/// partial pivoting. The last column without a pivot is the free variable;
/// it is set to 1 and the rest follow by back-substitution. The vector is
/// then scaled to unit length.
///
/// # Errors
/// Fails wherever [`eigenvalues`] fails.
///
/// # Example
/// ```
/// use madola::interpreter::linalg::eigen::eigenvectors;
///
/// let m = vec![vec![2.0, 0.0], vec![0.0, 3.0]];
/// let vectors = eigenvectors(&m, 1).unwrap();
/// // the first column belongs to eigenvalue 3
/// assert_eq!(vectors[0][0].abs(), 0.0);
/// assert_eq!(vectors[1][0].abs(), 1.0);
/// ```
pub fn eigenvectors(rows: &[Vec<f64>], line: usize) -> EvalResult<Matrix> {
    let n = require_square(rows, "Eigenvectors", "eigenvectors", line)?;
    if n == 1 {
        return Ok(vec![vec![1.0]]);
    }

    let vectors: Matrix = eigenvalues(rows, line)?.into_iter()
                                                  .map(|lambda| null_vector(rows, lambda))
                                                  .collect();
    Ok(transpose(&vectors))
}

fn null_vector(rows: &[Vec<f64>], lambda: f64) -> Vec<f64> {
    let n = rows.len();
    let mut m = rows.to_vec();
    for (i, row) in m.iter_mut().enumerate() {
        row[i] -= lambda;
    }

    for col in 0..n {
        let pivot_row = (col..n).fold(col, |best, row| {
                                    if m[row][col].abs() > m[best][col].abs() {
                                        row
                                    } else {
                                        best
                                    }
                                });
        m.swap(col, pivot_row);
        if m[col][col].abs() < PIVOT_EPSILON {
            continue;
        }
        for row in col + 1..n {
            let factor = m[row][col] / m[col][col];
            for c in col..n {
                m[row][c] -= factor * m[col][c];
            }
        }
    }

    let leading = |row: &[f64]| row.iter().position(|v| v.abs() > PIVOT_EPSILON);
    let pivots: Vec<usize> = m.iter().filter_map(|row| leading(row)).collect();
    let free = (0..n).rev().find(|c| !pivots.contains(c)).unwrap_or(n - 1);

    let mut vector = vec![0.0; n];
    vector[free] = 1.0;
    for row in m.iter().rev() {
        let Some(lead) = leading(row) else { continue };
        if lead == free {
            continue;
        }
        let sum: f64 = (lead + 1..n).map(|j| row[j] * vector[j]).sum();
        vector[lead] = -sum / row[lead];
    }

    let norm = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm > HOUSEHOLDER_EPSILON {
        for v in &mut vector {
            *v /= norm;
        }
    }
    vector
}
