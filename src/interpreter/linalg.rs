/// Shape checks, trace, transpose and identity.
pub mod core;

/// Matrix and vector products.
///
/// Checks conformal shapes before computing and tags the result as a matrix,
/// a vector or a scalar.
pub mod product;

/// Determinant by cofactor expansion.
pub mod determinant;

/// Matrix inverse by Gauss-Jordan elimination.
pub mod inverse;

/// Eigenvalues by Householder QR iteration and eigenvectors by elimination.
///
/// Intended for the small, well-conditioned matrices of engineering
/// calculations. Repeated or defective eigenvalues are not handled robustly.
pub mod eigen;

pub use self::core::Matrix;
