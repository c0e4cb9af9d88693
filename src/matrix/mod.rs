mod ops;
mod symmetric;
mod util;

pub use symmetric::SymmetricMatrix;

use alloc::vec;
use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use crate::linalg::LinalgError;
use crate::traits::{MatrixMut, MatrixRef, Scalar};

/// Dynamically-sized heap-allocated square matrix.
///
/// Column-major `Vec<T>` storage, so the tail of a column below a pivot is a
/// contiguous slice (see [`MatrixRef::col_as_slice`]). This is the working
/// matrix every algorithm in [`crate::linalg`] mutates in place.
///
/// # Examples
///
/// ```
/// use hqr::SquareMatrix;
///
/// let a = SquareMatrix::from_rows(2, &[1.0_f64, 2.0, 3.0, 4.0]);
/// assert_eq!(a[(0, 1)], 2.0);
/// assert_eq!(a.size(), 2);
///
/// let b = SquareMatrix::<f64>::eye(3);
/// assert_eq!(b[(0, 0)], 1.0);
/// assert_eq!(b[(0, 1)], 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SquareMatrix<T> {
    data: Vec<T>,
    n: usize,
}

// ── Constructors ────────────────────────────────────────────────────

impl<T: Scalar> SquareMatrix<T> {
    /// Create an `n x n` matrix of zeros.
    ///
    /// ```
    /// use hqr::SquareMatrix;
    /// let m = SquareMatrix::<f64>::zeros(3);
    /// assert_eq!(m.size(), 3);
    /// assert_eq!(m[(1, 2)], 0.0);
    /// ```
    pub fn zeros(n: usize) -> Self {
        Self {
            data: vec![T::zero(); n * n],
            n,
        }
    }

    /// Create an `n x n` identity matrix.
    ///
    /// ```
    /// use hqr::SquareMatrix;
    /// let id = SquareMatrix::<f64>::eye(3);
    /// assert_eq!(id[(0, 0)], 1.0);
    /// assert_eq!(id[(0, 1)], 0.0);
    /// assert_eq!(id[(2, 2)], 1.0);
    /// ```
    pub fn eye(n: usize) -> Self {
        let mut m = Self::zeros(n);
        m.set_identity();
        m
    }

    /// Overwrite `self` with the identity, keeping its size.
    pub fn set_identity(&mut self) {
        let n = self.n;
        for j in 0..n {
            for i in 0..n {
                self.data[j * n + i] = if i == j { T::one() } else { T::zero() };
            }
        }
    }

    /// Create a matrix from a flat slice in row-major order.
    ///
    /// Panics if `row_major.len() != n * n`.
    ///
    /// ```
    /// use hqr::SquareMatrix;
    /// let m = SquareMatrix::from_rows(2, &[1.0, 2.0, 3.0, 4.0]);
    /// assert_eq!(m[(0, 1)], 2.0);
    /// assert_eq!(m[(1, 0)], 3.0);
    /// ```
    pub fn from_rows(n: usize, row_major: &[T]) -> Self {
        assert_eq!(
            row_major.len(),
            n * n,
            "slice length {} does not match {}x{} matrix",
            row_major.len(),
            n,
            n,
        );
        Self::from_fn(n, |i, j| row_major[i * n + j])
    }

    /// Fallible variant of [`from_rows`](Self::from_rows).
    ///
    /// ```
    /// use hqr::SquareMatrix;
    /// use hqr::linalg::LinalgError;
    ///
    /// let err = SquareMatrix::try_from_rows(2, &[1.0_f64, 2.0, 3.0]).unwrap_err();
    /// assert_eq!(err, LinalgError::DimensionMismatch { expected: 4, got: 3 });
    /// ```
    pub fn try_from_rows(n: usize, row_major: &[T]) -> Result<Self, LinalgError> {
        if row_major.len() != n * n {
            return Err(LinalgError::DimensionMismatch {
                expected: n * n,
                got: row_major.len(),
            });
        }
        Ok(Self::from_rows(n, row_major))
    }

    /// Create a square diagonal matrix from its diagonal entries.
    ///
    /// ```
    /// use hqr::SquareMatrix;
    /// let m = SquareMatrix::from_diag(&[2.0, 3.0]);
    /// assert_eq!(m[(1, 1)], 3.0);
    /// assert_eq!(m[(0, 1)], 0.0);
    /// ```
    pub fn from_diag(diag: &[T]) -> Self {
        let n = diag.len();
        let mut m = Self::zeros(n);
        for (i, &d) in diag.iter().enumerate() {
            m[(i, i)] = d;
        }
        m
    }
}

impl<T> SquareMatrix<T> {
    /// Number of rows (and columns).
    #[inline]
    pub fn size(&self) -> usize {
        self.n
    }

    /// Create a matrix by calling `f(row, col)` for each element.
    ///
    /// ```
    /// use hqr::SquareMatrix;
    /// let m = SquareMatrix::from_fn(3, |i, j| (i * 3 + j) as f64);
    /// assert_eq!(m[(1, 1)], 4.0);
    /// ```
    pub fn from_fn(n: usize, f: impl Fn(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(n * n);
        for j in 0..n {
            for i in 0..n {
                data.push(f(i, j));
            }
        }
        Self { data, n }
    }

    /// Flat column-major view of the storage.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

// ── MatrixRef / MatrixMut ───────────────────────────────────────────

impl<T> MatrixRef<T> for SquareMatrix<T> {
    #[inline]
    fn nrows(&self) -> usize {
        self.n
    }

    #[inline]
    fn ncols(&self) -> usize {
        self.n
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> &T {
        &self.data[col * self.n + row]
    }

    #[inline]
    fn col_as_slice(&self, col: usize, row_start: usize) -> &[T] {
        let start = col * self.n + row_start;
        let end = col * self.n + self.n;
        &self.data[start..end]
    }
}

impl<T> MatrixMut<T> for SquareMatrix<T> {
    #[inline]
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T {
        &mut self.data[col * self.n + row]
    }

    #[inline]
    fn col_as_mut_slice(&mut self, col: usize, row_start: usize) -> &mut [T] {
        let start = col * self.n + row_start;
        let end = col * self.n + self.n;
        &mut self.data[start..end]
    }
}

// ── Index ───────────────────────────────────────────────────────────

impl<T> Index<(usize, usize)> for SquareMatrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(row < self.n && col < self.n, "index ({row}, {col}) out of bounds for {0}x{0} matrix", self.n);
        &self.data[col * self.n + row]
    }
}

impl<T> IndexMut<(usize, usize)> for SquareMatrix<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        assert!(row < self.n && col < self.n, "index ({row}, {col}) out of bounds for {0}x{0} matrix", self.n);
        &mut self.data[col * self.n + row]
    }
}
