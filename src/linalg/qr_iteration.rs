use alloc::vec::Vec;

use crate::linalg::{check_tolerance, eigenvalue_2x2, givens_qr_step, tridiagonalize_in_place, LinalgError};
use crate::matrix::{SquareMatrix, SymmetricMatrix};
use crate::traits::FloatScalar;

/// Origin shift applied before each QR step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shift {
    /// Plain QR steps. Converges linearly at the ratio of neighbouring
    /// eigenvalues.
    None,
    /// Shift by the eigenvalue of the trailing 2×2 block nearest its
    /// bottom-right entry (Wilkinson shift).
    #[default]
    Double,
}

/// Settings for the QR eigenvalue iteration.
#[derive(Debug, Clone, Copy)]
pub struct QrSettings<T> {
    /// Deflation threshold on the last active sub-diagonal entry.
    pub tolerance: T,
    /// Maximum number of QR steps.
    pub max_iter: usize,
    /// Shift strategy.
    pub shift: Shift,
}

impl Default for QrSettings<f64> {
    fn default() -> Self {
        Self {
            tolerance: 1e-12,
            max_iter: 10_000,
            shift: Shift::Double,
        }
    }
}

impl Default for QrSettings<f32> {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iter: 10_000,
            shift: Shift::Double,
        }
    }
}

/// Result of a QR eigenvalue iteration.
///
/// Holds the converged (near-diagonal) matrix, the accumulated orthogonal
/// basis if it was requested, and the number of QR steps taken. Eigenvector
/// `k` is column `k` of [`eigenvectors`](Self::eigenvectors) and pairs with
/// diagonal entry `k`.
#[derive(Debug, Clone)]
pub struct QrEigen<T> {
    diagonal: SquareMatrix<T>,
    eigenvectors: Option<SquareMatrix<T>>,
    iterations: usize,
}

impl<T: FloatScalar> QrEigen<T> {
    /// The converged matrix. Its off-diagonal entries are bounded by the
    /// tolerance, not exactly zero.
    #[inline]
    pub fn diagonal(&self) -> &SquareMatrix<T> {
        &self.diagonal
    }

    /// Eigenvalues in the order the iteration left them on the diagonal.
    pub fn eigenvalues(&self) -> Vec<T> {
        self.diagonal.diagonal()
    }

    /// Eigenvectors as columns, if requested.
    #[inline]
    pub fn eigenvectors(&self) -> Option<&SquareMatrix<T>> {
        self.eigenvectors.as_ref()
    }

    /// Number of QR steps performed.
    #[inline]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Order the eigenvalues ascending, permuting eigenvector columns to match.
    ///
    /// ```
    /// use hqr::SymmetricMatrix;
    /// use hqr::linalg::shifted_qr_iteration;
    ///
    /// let a = SymmetricMatrix::from_diag(&[5.0_f64, 3.0, 1.0]);
    /// let mut eig = shifted_qr_iteration(&a, true, 1e-12, 100).unwrap();
    /// eig.sort_ascending();
    /// assert_eq!(eig.eigenvalues(), vec![1.0, 3.0, 5.0]);
    /// ```
    pub fn sort_ascending(&mut self) {
        let n = self.diagonal.size();
        for i in 0..n {
            let mut min_idx = i;
            for j in (i + 1)..n {
                if self.diagonal[(j, j)] < self.diagonal[(min_idx, min_idx)] {
                    min_idx = j;
                }
            }
            if min_idx != i {
                self.diagonal.swap_rows(i, min_idx);
                self.diagonal.swap_cols(i, min_idx);
                if let Some(q) = self.eigenvectors.as_mut() {
                    q.swap_cols(i, min_idx);
                }
            }
        }
    }

    /// Consume into `(diagonal, eigenvectors, iterations)`.
    pub fn into_parts(self) -> (SquareMatrix<T>, Option<SquareMatrix<T>>, usize) {
        (self.diagonal, self.eigenvectors, self.iterations)
    }
}

/// Unshifted QR eigenvalue iteration for a symmetric matrix.
///
/// The matrix is tridiagonalized, then Givens QR steps `R·Q` are repeated
/// on the active leading block `0..=sz`. Each time the last active
/// sub-diagonal entry satisfies `|r[sz][sz−1]| <= tol`, that row deflates
/// and the block shrinks. The comparison is inclusive, so `tol = 0` accepts
/// sub-diagonal entries that are exactly zero. The final 2×2 block is
/// shifted by its own eigenvalue, which usually deflates it in one step.
///
/// With `with_vectors` the reflectors and rotations are accumulated into the
/// eigenvector basis. The source matrix is not modified.
///
/// # Errors
///
/// - [`LinalgError::InvalidTolerance`] if `tol` is negative or NaN.
/// - [`LinalgError::ConvergenceFailure`] if `max_iter` steps do not deflate
///   every row, or if the iteration produces a non-finite entry (overflow or
///   NaN in the input).
///
/// # Example
///
/// ```
/// use hqr::SymmetricMatrix;
/// use hqr::linalg::qr_iteration;
///
/// let a = SymmetricMatrix::from_lower(3, &[
///     4.0_f64,
///     1.0, 3.0,
///     0.0, 1.0, 2.0,
/// ]);
/// let eig = qr_iteration(&a, true, 1e-12, 1000).unwrap();
/// let sum: f64 = eig.eigenvalues().iter().sum();
/// assert!((sum - 9.0).abs() < 1e-10);
/// ```
pub fn qr_iteration<T: FloatScalar>(
    a: &SymmetricMatrix<T>,
    with_vectors: bool,
    tol: T,
    max_iter: usize,
) -> Result<QrEigen<T>, LinalgError> {
    iterate(a, with_vectors, tol, max_iter, Shift::None)
}

/// QR eigenvalue iteration with a double (Wilkinson) shift.
///
/// Same as [`qr_iteration`], but before every step the diagonal of the active
/// block is shifted by the eigenvalue of its trailing 2×2 block nearest the
/// bottom-right entry (see [`eigenvalue_2x2`]) and restored afterwards.
/// Convergence becomes quadratic or better, so far fewer steps are needed.
///
/// ```
/// use hqr::SymmetricMatrix;
/// use hqr::linalg::{qr_iteration, shifted_qr_iteration};
///
/// let a = SymmetricMatrix::from_fn(6, |i, j| if i == j { (i + 1) as f64 } else { 0.5 });
/// let plain = qr_iteration(&a, false, 1e-12, 10_000).unwrap();
/// let shifted = shifted_qr_iteration(&a, false, 1e-12, 10_000).unwrap();
/// assert!(shifted.iterations() <= plain.iterations());
/// ```
pub fn shifted_qr_iteration<T: FloatScalar>(
    a: &SymmetricMatrix<T>,
    with_vectors: bool,
    tol: T,
    max_iter: usize,
) -> Result<QrEigen<T>, LinalgError> {
    iterate(a, with_vectors, tol, max_iter, Shift::Double)
}

fn iterate<T: FloatScalar>(
    a: &SymmetricMatrix<T>,
    with_vectors: bool,
    tol: T,
    max_iter: usize,
    shift: Shift,
) -> Result<QrEigen<T>, LinalgError> {
    check_tolerance(tol)?;

    let n = a.size();
    let mut r = SquareMatrix::zeros(n);
    a.clone_into_square(&mut r);
    let mut q = with_vectors.then(|| SquareMatrix::eye(n));
    tridiagonalize_in_place(&mut r, q.as_mut());

    let mut qk = SquareMatrix::eye(n);
    let mut sz = n.saturating_sub(1);
    let mut iterations = 0;
    while sz > 0 {
        if iterations == max_iter {
            log::debug!(
                "QR iteration gave up after {} steps with {} rows still active",
                iterations,
                sz + 1
            );
            return Err(LinalgError::ConvergenceFailure { iterations });
        }
        iterations += 1;

        // The last 2×2 block is always shifted by its own eigenvalue.
        let closing = sz == 1;
        let u = if closing || shift == Shift::Double {
            // Sub-diagonal on both sides keeps the block exactly symmetric.
            let off = r[(sz, sz - 1)];
            eigenvalue_2x2(r[(sz - 1, sz - 1)], off, off, r[(sz, sz)])?
        } else {
            T::zero()
        };
        log::trace!("step {}: active 0..={}, shift {:?}", iterations, sz, u);

        for i in 0..=sz {
            r[(i, i)] = r[(i, i)] - u;
        }
        givens_qr_step(&mut r, Some(&mut qk), sz);
        r *= &qk;
        for i in 0..=sz {
            r[(i, i)] = r[(i, i)] + u;
        }
        if let Some(q) = q.as_mut() {
            *q *= &qk;
        }

        let off = r[(sz, sz - 1)];
        if !off.is_finite() {
            log::debug!("non-finite sub-diagonal at row {} after {} steps", sz, iterations);
            return Err(LinalgError::ConvergenceFailure { iterations });
        }
        if off.abs() <= tol {
            log::debug!("deflated row {} after {} steps", sz, iterations);
            sz -= 1;
        }
    }

    if r.diagonal().iter().any(|x| !x.is_finite()) {
        log::debug!("non-finite eigenvalue after {} steps", iterations);
        return Err(LinalgError::ConvergenceFailure { iterations });
    }

    log::debug!("QR iteration converged in {} steps ({}x{})", iterations, n, n);
    Ok(QrEigen {
        diagonal: r,
        eigenvectors: q,
        iterations,
    })
}

/// Settings-driven QR eigensolver.
impl<T: FloatScalar> SymmetricMatrix<T> {
    /// Eigendecomposition by QR iteration, sorted ascending, with
    /// eigenvectors as columns.
    ///
    /// ```
    /// use hqr::SymmetricMatrix;
    /// use hqr::linalg::QrSettings;
    ///
    /// let a = SymmetricMatrix::from_lower(2, &[2.0_f64, 1.0, 2.0]);
    /// let eig = a.eig_qr(&QrSettings::default()).unwrap();
    /// let vals = eig.eigenvalues();
    /// assert!((vals[0] - 1.0).abs() < 1e-12);
    /// assert!((vals[1] - 3.0).abs() < 1e-12);
    /// ```
    pub fn eig_qr(&self, settings: &QrSettings<T>) -> Result<QrEigen<T>, LinalgError> {
        let mut eig = iterate(self, true, settings.tolerance, settings.max_iter, settings.shift)?;
        eig.sort_ascending();
        Ok(eig)
    }

    /// Eigenvalues only, sorted ascending.
    pub fn eigenvalues_qr(&self, settings: &QrSettings<T>) -> Result<Vec<T>, LinalgError> {
        let mut eig = iterate(self, false, settings.tolerance, settings.max_iter, settings.shift)?;
        eig.sort_ascending();
        Ok(eig.eigenvalues())
    }
}
