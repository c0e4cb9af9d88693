use alloc::vec;
use core::ops::{Mul, MulAssign};

use crate::traits::Scalar;

use super::SquareMatrix;

// ── Matrix multiplication ───────────────────────────────────────────

impl<T: Scalar> Mul<&SquareMatrix<T>> for &SquareMatrix<T> {
    type Output = SquareMatrix<T>;

    fn mul(self, rhs: &SquareMatrix<T>) -> SquareMatrix<T> {
        assert_eq!(
            self.n, rhs.n,
            "dimension mismatch: {0}x{0} * {1}x{1}",
            self.n, rhs.n,
        );
        let n = self.n;
        let mut data = vec![T::zero(); n * n];
        // Column-major: C[:, j] = sum_k A[:, k] * B[k, j]
        for j in 0..n {
            for k in 0..n {
                let b_kj = rhs.data[j * n + k];
                if b_kj == T::zero() {
                    continue;
                }
                for i in 0..n {
                    data[j * n + i] = data[j * n + i] + self.data[k * n + i] * b_kj;
                }
            }
        }
        SquareMatrix { data, n }
    }
}

impl<T: Scalar> Mul for SquareMatrix<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        &self * &rhs
    }
}

impl<T: Scalar> Mul<&SquareMatrix<T>> for SquareMatrix<T> {
    type Output = SquareMatrix<T>;

    fn mul(self, rhs: &SquareMatrix<T>) -> SquareMatrix<T> {
        &self * rhs
    }
}

impl<T: Scalar> MulAssign<&SquareMatrix<T>> for SquareMatrix<T> {
    /// `self = self * rhs`.
    fn mul_assign(&mut self, rhs: &SquareMatrix<T>) {
        *self = &*self * rhs;
    }
}

impl<T: Scalar> MulAssign for SquareMatrix<T> {
    fn mul_assign(&mut self, rhs: Self) {
        self.mul_assign(&rhs);
    }
}

// ── Scalar multiplication ───────────────────────────────────────────

impl<T: Scalar> Mul<T> for SquareMatrix<T> {
    type Output = Self;

    fn mul(mut self, rhs: T) -> Self {
        self *= rhs;
        self
    }
}

impl<T: Scalar> MulAssign<T> for SquareMatrix<T> {
    fn mul_assign(&mut self, rhs: T) {
        for x in self.data.iter_mut() {
            *x = *x * rhs;
        }
    }
}

// ── Transpose ───────────────────────────────────────────────────────

impl<T: Copy> SquareMatrix<T> {
    /// Transpose into a new matrix.
    ///
    /// ```
    /// use hqr::SquareMatrix;
    /// let m = SquareMatrix::from_rows(2, &[1.0, 2.0, 3.0, 4.0]);
    /// let t = m.transpose();
    /// assert_eq!(t[(0, 1)], 3.0);
    /// assert_eq!(t[(1, 0)], 2.0);
    /// ```
    pub fn transpose(&self) -> Self {
        let n = self.n;
        SquareMatrix::from_fn(n, |i, j| self.data[i * n + j])
    }

    /// Transpose in place by swapping across the diagonal.
    pub fn transpose_in_place(&mut self) {
        let n = self.n;
        for j in 0..n {
            for i in (j + 1)..n {
                self.data.swap(j * n + i, i * n + j);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_multiply() {
        let a = SquareMatrix::from_rows(2, &[1.0, 2.0, 3.0, 4.0]);
        let b = SquareMatrix::from_rows(2, &[5.0, 6.0, 7.0, 8.0]);
        let c = &a * &b;
        assert_eq!(c[(0, 0)], 19.0);
        assert_eq!(c[(0, 1)], 22.0);
        assert_eq!(c[(1, 0)], 43.0);
        assert_eq!(c[(1, 1)], 50.0);
    }

    #[test]
    fn mul_assign_is_right_multiplication() {
        let mut a = SquareMatrix::from_rows(2, &[1.0, 2.0, 3.0, 4.0]);
        let b = SquareMatrix::from_rows(2, &[0.0, 1.0, 1.0, 0.0]);
        a *= &b;
        // Right-multiplying by a permutation swaps columns.
        assert_eq!(a, SquareMatrix::from_rows(2, &[2.0, 1.0, 4.0, 3.0]));
    }

    #[test]
    #[should_panic(expected = "dimension mismatch")]
    fn multiply_dim_mismatch() {
        let a = SquareMatrix::<f64>::eye(2);
        let b = SquareMatrix::<f64>::eye(3);
        let _ = &a * &b;
    }

    #[test]
    fn identity_multiply() {
        let a = SquareMatrix::from_rows(3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        let id = SquareMatrix::eye(3);
        assert_eq!(&a * &id, a);
        assert_eq!(&id * &a, a);
    }

    #[test]
    fn scalar_multiply() {
        let a = SquareMatrix::from_rows(2, &[1.0, 2.0, 3.0, 4.0]) * 2.0;
        assert_eq!(a[(1, 1)], 8.0);
    }

    #[test]
    fn transpose() {
        let a = SquareMatrix::from_rows(3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        let t = a.transpose();
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(t[(i, j)], a[(j, i)]);
            }
        }
        let mut b = a.clone();
        b.transpose_in_place();
        assert_eq!(b, t);
    }
}
