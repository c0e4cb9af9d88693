//! Householder tridiagonalization and QR eigenvalue iteration.
//!
//! Free functions operate in place on a [`SquareMatrix`](crate::SquareMatrix)
//! (or any [`MatrixMut`](crate::MatrixMut)); the drivers
//! [`qr_iteration`] and [`shifted_qr_iteration`] take a
//! [`SymmetricMatrix`](crate::SymmetricMatrix) and return a [`QrEigen`].
//!
//! Pipeline, leaf-first:
//!
//! - [`householder_vector`]: reflector for one column
//! - [`householder_similarity`]: `H·M·H` below a pivot
//! - [`tridiagonalize_in_place`] / [`tridiagonalize`]: symmetric → tridiagonal
//! - [`givens_qr_step`]: one QR step on a tridiagonal matrix
//! - [`eigenvalue_2x2`]: closed-form shift estimate
//! - [`qr_iteration`] / [`shifted_qr_iteration`]: full eigenvalue iteration

mod eigen2;
mod givens;
mod householder;
mod qr_iteration;
mod tridiagonal;

pub use eigen2::eigenvalue_2x2;
pub use givens::{givens, givens_qr_step};
pub use householder::{householder_similarity, householder_vector, reflect_columns, reflect_rows};
pub use qr_iteration::{qr_iteration, shifted_qr_iteration, QrEigen, QrSettings, Shift};
pub use tridiagonal::{tridiagonalize, tridiagonalize_in_place, Tridiagonal};

use crate::traits::FloatScalar;

/// Errors from the eigenvalue routines and the matrix constructors.
///
/// ```
/// use hqr::SymmetricMatrix;
/// use hqr::linalg::{qr_iteration, LinalgError};
///
/// let a = SymmetricMatrix::from_lower(2, &[2.0_f64, 1.0, 2.0]);
/// let err = qr_iteration(&a, false, -1e-9, 100).unwrap_err();
/// assert_eq!(err, LinalgError::InvalidTolerance);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinalgError {
    /// Convergence tolerance is negative or NaN.
    InvalidTolerance,
    /// QR iteration did not deflate every eigenvalue within the iteration budget.
    ConvergenceFailure {
        /// Number of iterations attempted.
        iterations: usize,
    },
    /// A 2×2 block has a negative discriminant (complex eigenvalue pair).
    ComplexEigenvalues,
    /// A Householder vector was requested for an empty column.
    EmptyVector,
    /// Matrix is not symmetric.
    NotSymmetric,
    /// Input slice length does not match the requested dimensions.
    DimensionMismatch {
        /// Expected number of elements.
        expected: usize,
        /// Number of elements supplied.
        got: usize,
    },
}

impl core::fmt::Display for LinalgError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LinalgError::InvalidTolerance => {
                write!(f, "tolerance must be non-negative and not NaN")
            }
            LinalgError::ConvergenceFailure { iterations } => {
                write!(f, "QR iteration did not converge after {} iterations", iterations)
            }
            LinalgError::ComplexEigenvalues => {
                write!(f, "2x2 block has complex eigenvalues")
            }
            LinalgError::EmptyVector => write!(f, "householder vector of an empty column"),
            LinalgError::NotSymmetric => write!(f, "matrix is not symmetric"),
            LinalgError::DimensionMismatch { expected, got } => {
                write!(f, "dimension mismatch: expected {} elements, got {}", expected, got)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LinalgError {}

/// Reject a negative (or NaN) convergence tolerance.
///
/// ```
/// use hqr::linalg::{check_tolerance, LinalgError};
///
/// assert!(check_tolerance(0.0_f64).is_ok());
/// assert_eq!(check_tolerance(-1e-9_f64), Err(LinalgError::InvalidTolerance));
/// ```
pub fn check_tolerance<T: FloatScalar>(tol: T) -> Result<(), LinalgError> {
    if tol.is_nan() || tol < T::zero() {
        return Err(LinalgError::InvalidTolerance);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn tolerance_validation() {
        assert!(check_tolerance(1e-12_f64).is_ok());
        assert!(check_tolerance(0.0_f32).is_ok());
        assert_eq!(check_tolerance(-1e-9_f64), Err(LinalgError::InvalidTolerance));
        assert_eq!(check_tolerance(f64::NAN), Err(LinalgError::InvalidTolerance));
    }

    #[test]
    fn display_messages() {
        assert_eq!(
            LinalgError::ConvergenceFailure { iterations: 7 }.to_string(),
            "QR iteration did not converge after 7 iterations"
        );
        assert_eq!(
            LinalgError::DimensionMismatch { expected: 4, got: 3 }.to_string(),
            "dimension mismatch: expected 4 elements, got 3"
        );
        assert_eq!(LinalgError::NotSymmetric.to_string(), "matrix is not symmetric");
    }
}
