use madola::{
    error::ErrorKind,
    evaluate,
    interpreter::linalg::{
        Matrix,
        core::{identity, transpose},
        determinant::determinant,
        eigen::{eigenvalues, eigenvectors},
        inverse::inverse,
        product::matrix_matrix,
    },
};
use pretty_assertions::assert_eq;

fn assert_close(a: &[Vec<f64>], b: &[Vec<f64>], tolerance: f64) {
    assert_eq!(a.len(), b.len());
    for (row_a, row_b) in a.iter().zip(b) {
        for (x, y) in row_a.iter().zip(row_b) {
            assert!((x - y).abs() < tolerance, "{a:?} differs from {b:?}");
        }
    }
}

fn sample() -> Matrix {
    vec![vec![4.0, -2.0, 1.0], vec![3.0, 6.0, -4.0], vec![2.0, 1.0, 8.0]]
}

#[test]
fn inverse_times_matrix_is_identity() {
    let m = sample();
    let inv = inverse(&m, 1).unwrap();
    assert_close(&matrix_matrix(&m, &inv, 1).unwrap(), &identity(3), 1e-9);
    assert_close(&matrix_matrix(&inv, &m, 1).unwrap(), &identity(3), 1e-9);
}

#[test]
fn inverse_of_four_by_four_uses_elimination() {
    let m = vec![vec![2.0, 0.0, 0.0, 1.0],
                 vec![0.0, 3.0, 0.0, 0.0],
                 vec![0.0, 0.0, 4.0, 0.0],
                 vec![1.0, 0.0, 0.0, 2.0],];
    let inv = inverse(&m, 1).unwrap();
    assert_close(&matrix_matrix(&m, &inv, 1).unwrap(), &identity(4), 1e-9);
}

/// Deterministic entries in `[-1, 1)` from a linear congruential generator.
fn pseudo_random_matrix(n: usize, seed: u64) -> Matrix {
    let mut state = seed;
    let mut next = || {
        state = state.wrapping_mul(6_364_136_223_846_793_005)
                     .wrapping_add(1_442_695_040_888_963_407);
        f64::from(u32::try_from(state >> 40).unwrap()) / f64::from(1u32 << 23) - 1.0
    };
    (0..n).map(|_| (0..n).map(|_| next()).collect()).collect()
}

/// Determinant by LU elimination with partial pivoting.
fn lu_determinant(mut m: Matrix) -> f64 {
    let n = m.len();
    let mut det = 1.0;
    for col in 0..n {
        let pivot = (col..n).max_by(|&a, &b| m[a][col].abs().total_cmp(&m[b][col].abs()))
                            .unwrap();
        if m[pivot][col] == 0.0 {
            return 0.0;
        }
        if pivot != col {
            m.swap(pivot, col);
            det = -det;
        }
        det *= m[col][col];
        for row in col + 1..n {
            let factor = m[row][col] / m[col][col];
            for k in col..n {
                m[row][k] -= factor * m[col][k];
            }
        }
    }
    det
}

#[test]
fn cofactor_determinant_matches_elimination() {
    for n in 1..=6 {
        for seed in 1..=5 {
            let mut m = pseudo_random_matrix(n, seed * 31 + n as u64);
            for (i, row) in m.iter_mut().enumerate() {
                row[i] += n as f64 + 1.0;
            }
            let expected = lu_determinant(m.clone());
            let got = determinant(&m, 1).unwrap();
            assert!((got - expected).abs() <= 1e-9 * expected.abs(),
                    "n = {n}, seed = {seed}: {got} vs {expected}");
        }
    }
}

#[test]
fn determinant_is_multiplicative() {
    let a = sample();
    let b = vec![vec![1.0, 2.0, 0.0], vec![0.0, 1.0, 3.0], vec![2.0, 0.0, 1.0]];
    let product = matrix_matrix(&a, &b, 1).unwrap();
    let expected = determinant(&a, 1).unwrap() * determinant(&b, 1).unwrap();
    assert!((determinant(&product, 1).unwrap() - expected).abs() < 1e-6);
}

#[test]
fn transpose_reverses_products() {
    let a = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]];
    let b = vec![vec![1.0, 0.0], vec![2.0, 1.0], vec![0.0, 3.0]];
    let left = transpose(&matrix_matrix(&a, &b, 1).unwrap());
    let right = matrix_matrix(&transpose(&b), &transpose(&a), 1).unwrap();
    assert_eq!(left, right);
}

#[test]
fn eigenpairs_of_symmetric_matrix() {
    let m = vec![vec![2.0, 1.0, 0.0], vec![1.0, 2.0, 0.0], vec![0.0, 0.0, 5.0]];
    let values = eigenvalues(&m, 1).unwrap();
    let mut sorted = values.clone();
    sorted.sort_by(f64::total_cmp);
    for (got, want) in sorted.iter().zip([1.0, 3.0, 5.0]) {
        assert!((got - want).abs() < 1e-8, "got {got}, want {want}");
    }

    let vectors = eigenvectors(&m, 1).unwrap();
    for (j, lambda) in values.iter().enumerate() {
        let v: Vec<f64> = vectors.iter().map(|row| row[j]).collect();
        for (i, row) in m.iter().enumerate() {
            let av: f64 = row.iter().zip(&v).map(|(a, x)| a * x).sum();
            assert!((av - lambda * v[i]).abs() < 1e-6);
        }
    }
}

#[test]
fn singular_matrix_has_no_inverse() {
    let m = vec![vec![1.0, 2.0, 3.0], vec![2.0, 4.0, 6.0], vec![1.0, 0.0, 1.0]];
    let err = inverse(&m, 4).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Singular);
    assert_eq!(err.to_string(), "Error on line 4: Matrix is singular (determinant is zero)");
}

#[test]
fn matrix_methods_from_programs() {
    let result = evaluate("@version 0.01\nA := [4, 7; 2, 6];\nprint(A.inv());\nprint(A.det());\nprint(A.tr());\nB := [2, 0; 0, 3];\nprint(B.eigenvalues());");
    assert!(result.success, "{:?}", result.error);
    assert_eq!(result.outputs,
               vec!["[[0.6, -0.7]; [-0.2, 0.4]]", "10", "10", "[3, 2]"]);
}

#[test]
fn transpose_flips_vector_orientation() {
    let result = evaluate("@version 0.01\nv := [1, 2, 3];\nprint(v.T());\nprint(type(v));\nw := v.T();\nprint(type(w));");
    assert_eq!(result.outputs, vec!["[1; 2; 3]", "array", "column_vector"]);
}

#[test]
fn non_square_matrix_is_rejected() {
    let result = evaluate("@version 0.01\nA := [1, 2, 3; 4, 5, 6];\nd := A.det();");
    assert_eq!(result.error_kind, Some(ErrorKind::DimensionMismatch));
    assert_eq!(result.error.as_deref(),
               Some("Error on line 3: Det() requires a square matrix, got 2x3"));
}

#[test]
fn complex_eigenvalues_are_unsupported() {
    let result = evaluate("@version 0.01\nR := [0, -1; 1, 0];\ne := R.eigenvalues();");
    assert_eq!(result.error_kind, Some(ErrorKind::Unsupported));
}

#[test]
fn matrix_product_shapes_must_agree() {
    let result = evaluate("@version 0.01\nA := [1, 2; 3, 4];\nB := [1, 2, 3; 4, 5, 6; 7, 8, 9];\nC := A * B;");
    assert_eq!(result.error_kind, Some(ErrorKind::DimensionMismatch));
    assert_eq!(result.error.as_deref(),
               Some("Error on line 4: Matrix multiplication dimension mismatch: 2x2 matrix cannot multiply 3x3 matrix"));
}
