use alloc::vec::Vec;
use core::ops::Index;

use crate::linalg::LinalgError;
use crate::traits::Scalar;

use super::SquareMatrix;

/// Read-only real symmetric matrix.
///
/// Stores only the lower triangle, packed row by row
/// (`a00, a10, a11, a20, a21, a22, ...`), so symmetry holds by
/// construction. Algorithms never mutate it: they materialize a full
/// [`SquareMatrix`] working copy with [`to_square`](Self::to_square).
///
/// # Examples
///
/// ```
/// use hqr::SymmetricMatrix;
///
/// let a = SymmetricMatrix::from_lower(2, &[2.0_f64, 1.0, 2.0]);
/// assert_eq!(a[(0, 1)], 1.0);
/// assert_eq!(a[(1, 0)], 1.0);
/// assert_eq!(a.size(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SymmetricMatrix<T> {
    data: Vec<T>,
    n: usize,
}

#[inline]
fn packed_index(row: usize, col: usize) -> usize {
    let (i, j) = if row >= col { (row, col) } else { (col, row) };
    i * (i + 1) / 2 + j
}

impl<T: Scalar> SymmetricMatrix<T> {
    /// Create an `n x n` symmetric matrix from its packed lower triangle.
    ///
    /// Panics if `lower.len() != n * (n + 1) / 2`.
    pub fn from_lower(n: usize, lower: &[T]) -> Self {
        assert_eq!(
            lower.len(),
            n * (n + 1) / 2,
            "packed length {} does not match {}x{} symmetric matrix",
            lower.len(),
            n,
            n,
        );
        Self {
            data: lower.to_vec(),
            n,
        }
    }

    /// Fallible variant of [`from_lower`](Self::from_lower).
    pub fn try_from_lower(n: usize, lower: &[T]) -> Result<Self, LinalgError> {
        if lower.len() != n * (n + 1) / 2 {
            return Err(LinalgError::DimensionMismatch {
                expected: n * (n + 1) / 2,
                got: lower.len(),
            });
        }
        Ok(Self::from_lower(n, lower))
    }

    /// Create a symmetric matrix from a full row-major slice.
    ///
    /// Returns [`LinalgError::NotSymmetric`] unless `rows[i*n+j] == rows[j*n+i]`
    /// for every pair.
    ///
    /// ```
    /// use hqr::SymmetricMatrix;
    /// use hqr::linalg::LinalgError;
    ///
    /// let a = SymmetricMatrix::from_rows(2, &[2.0_f64, 1.0, 1.0, 2.0]).unwrap();
    /// assert_eq!(a[(1, 0)], 1.0);
    ///
    /// let bad = SymmetricMatrix::from_rows(2, &[2.0_f64, 1.0, 0.0, 2.0]);
    /// assert_eq!(bad.unwrap_err(), LinalgError::NotSymmetric);
    /// ```
    pub fn from_rows(n: usize, rows: &[T]) -> Result<Self, LinalgError> {
        let square = SquareMatrix::try_from_rows(n, rows)?;
        Self::try_from(&square)
    }

    /// Create a symmetric matrix from `f(row, col)`, evaluated on the lower
    /// triangle only (`row >= col`).
    ///
    /// ```
    /// use hqr::SymmetricMatrix;
    /// let a = SymmetricMatrix::from_fn(3, |i, j| (i + j) as f64);
    /// assert_eq!(a[(0, 2)], 2.0);
    /// ```
    pub fn from_fn(n: usize, f: impl Fn(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(n * (n + 1) / 2);
        for i in 0..n {
            for j in 0..=i {
                data.push(f(i, j));
            }
        }
        Self { data, n }
    }

    /// `n x n` identity.
    pub fn eye(n: usize) -> Self {
        Self::from_fn(n, |i, j| if i == j { T::one() } else { T::zero() })
    }

    /// Diagonal matrix with the given entries.
    ///
    /// ```
    /// use hqr::SymmetricMatrix;
    /// let a = SymmetricMatrix::from_diag(&[5.0_f64, 3.0, 1.0]);
    /// assert_eq!(a[(1, 1)], 3.0);
    /// assert_eq!(a[(2, 0)], 0.0);
    /// ```
    pub fn from_diag(diag: &[T]) -> Self {
        Self::from_fn(diag.len(), |i, j| if i == j { diag[i] } else { T::zero() })
    }

    /// Materialize a full square copy for an algorithm to mutate.
    ///
    /// ```
    /// use hqr::SymmetricMatrix;
    /// let a = SymmetricMatrix::from_lower(2, &[2.0_f64, 1.0, 3.0]);
    /// let s = a.to_square();
    /// assert_eq!(s[(0, 1)], 1.0);
    /// assert!(s.is_symmetric());
    /// ```
    pub fn to_square(&self) -> SquareMatrix<T> {
        SquareMatrix::from_fn(self.n, |i, j| self.data[packed_index(i, j)])
    }

    /// Overwrite `dst` with a full square copy, reusing its allocation when
    /// the size already matches.
    pub fn clone_into_square(&self, dst: &mut SquareMatrix<T>) {
        if dst.size() != self.n {
            *dst = SquareMatrix::zeros(self.n);
        }
        for j in 0..self.n {
            for i in 0..self.n {
                dst[(i, j)] = self.data[packed_index(i, j)];
            }
        }
    }
}

impl<T> SymmetricMatrix<T> {
    /// Number of rows (and columns).
    #[inline]
    pub fn size(&self) -> usize {
        self.n
    }

    /// Packed lower-triangle storage.
    #[inline]
    pub fn as_packed(&self) -> &[T] {
        &self.data
    }
}

impl<T> Index<(usize, usize)> for SymmetricMatrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(row < self.n && col < self.n, "index ({row}, {col}) out of bounds for {0}x{0} matrix", self.n);
        &self.data[packed_index(row, col)]
    }
}

impl<T: Scalar> TryFrom<&SquareMatrix<T>> for SymmetricMatrix<T> {
    type Error = LinalgError;

    /// Pack a square matrix, rejecting it unless it is exactly symmetric.
    fn try_from(m: &SquareMatrix<T>) -> Result<Self, Self::Error> {
        if !m.is_symmetric() {
            return Err(LinalgError::NotSymmetric);
        }
        Ok(Self::from_fn(m.size(), |i, j| m[(i, j)]))
    }
}

impl<T: Scalar> From<&SymmetricMatrix<T>> for SquareMatrix<T> {
    fn from(a: &SymmetricMatrix<T>) -> Self {
        a.to_square()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_layout() {
        let a = SymmetricMatrix::from_lower(3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(a[(0, 0)], 1.0);
        assert_eq!(a[(1, 0)], 2.0);
        assert_eq!(a[(1, 1)], 3.0);
        assert_eq!(a[(2, 0)], 4.0);
        assert_eq!(a[(2, 1)], 5.0);
        assert_eq!(a[(2, 2)], 6.0);
        assert_eq!(a[(0, 2)], 4.0);
        assert_eq!(a[(1, 2)], 5.0);
    }

    #[test]
    #[should_panic(expected = "packed length")]
    fn from_lower_wrong_length() {
        let _ = SymmetricMatrix::from_lower(2, &[1.0, 2.0]);
    }

    #[test]
    fn try_from_lower_wrong_length() {
        let err = SymmetricMatrix::try_from_lower(3, &[1.0, 2.0]).unwrap_err();
        assert_eq!(err, LinalgError::DimensionMismatch { expected: 6, got: 2 });
    }

    #[test]
    fn to_square_is_symmetric() {
        let a = SymmetricMatrix::from_fn(4, |i, j| (i * 10 + j) as f64);
        let s = a.to_square();
        assert!(s.is_symmetric());
        assert_eq!(s[(1, 3)], 31.0);
        assert_eq!(s[(3, 1)], 31.0);
    }

    #[test]
    fn clone_into_square_resizes() {
        let a = SymmetricMatrix::from_lower(2, &[2.0, 1.0, 2.0]);
        let mut dst = SquareMatrix::zeros(5);
        a.clone_into_square(&mut dst);
        assert_eq!(dst, SquareMatrix::from_rows(2, &[2.0, 1.0, 1.0, 2.0]));
    }

    #[test]
    fn try_from_square() {
        let sym = SquareMatrix::from_rows(2, &[4.0, 1.0, 1.0, 3.0]);
        let a = SymmetricMatrix::try_from(&sym).unwrap();
        assert_eq!(a.to_square(), sym);

        let asym = SquareMatrix::from_rows(2, &[4.0, 1.0, 2.0, 3.0]);
        assert_eq!(SymmetricMatrix::try_from(&asym), Err(LinalgError::NotSymmetric));
    }

    #[test]
    fn from_rows_dimension_mismatch() {
        let err = SymmetricMatrix::from_rows(2, &[1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(err, LinalgError::DimensionMismatch { expected: 4, got: 3 });
    }

    #[test]
    fn eye_and_diag() {
        assert_eq!(SymmetricMatrix::<f64>::eye(3).to_square(), SquareMatrix::eye(3));
        let d = SymmetricMatrix::from_diag(&[5.0, 3.0, 1.0]);
        assert_eq!(d.to_square(), SquareMatrix::from_diag(&[5.0, 3.0, 1.0]));
    }
}
