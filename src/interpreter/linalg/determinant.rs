use crate::interpreter::{evaluator::core::EvalResult, linalg::core::require_square};

/// Computes the determinant of a square matrix.
///
/// Orders 1 and 2 use the closed form. Larger matrices use cofactor
/// expansion along the first row, which costs `O(n!)` and suits only the
/// small matrices of hand calculations.
///
/// # Errors
/// Fails for empty or non-square input.
///
/// # Example
/// ```
/// use madola::interpreter::linalg::determinant::determinant;
///
/// let m = vec![vec![2.0, 0.0, 1.0], vec![1.0, 3.0, 2.0], vec![1.0, 1.0, 1.0]];
/// assert_eq!(determinant(&m, 1).unwrap(), 1.0);
/// ```
pub fn determinant(rows: &[Vec<f64>], line: usize) -> EvalResult<f64> {
    require_square(rows, "Det", "determinant", line)?;
    Ok(cofactor_expansion(rows))
}

fn cofactor_expansion(rows: &[Vec<f64>]) -> f64 {
    match rows.len() {
        0 => 1.0,
        1 => rows[0][0],
        2 => rows[0][0] * rows[1][1] - rows[0][1] * rows[1][0],
        n => (0..n).map(|j| {
                       let minor: Vec<Vec<f64>> =
                           rows[1..].iter()
                                    .map(|row| {
                                        row.iter()
                                           .enumerate()
                                           .filter(|(k, _)| *k != j)
                                           .map(|(_, v)| *v)
                                           .collect()
                                    })
                                    .collect();
                       let sign = if j % 2 == 0 { 1.0 } else { -1.0 };
                       sign * rows[0][j] * cofactor_expansion(&minor)
                   })
                   .sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_forms() {
        assert_eq!(determinant(&[vec![7.0]], 1).unwrap(), 7.0);
        assert_eq!(determinant(&[vec![1.0, 2.0], vec![3.0, 4.0]], 1).unwrap(), -2.0);
    }

    #[test]
    fn empty_matrix_is_rejected() {
        let err = determinant(&[], 2).unwrap_err();
        assert_eq!(err.to_string(), "Error on line 2: Cannot compute determinant of empty matrix");
    }
}
