use alloc::vec::Vec;
use core::fmt::{self, Write as _};

use crate::traits::{FloatScalar, Scalar};

use super::SquareMatrix;

// ── Diagonal / trace ────────────────────────────────────────────────

impl<T: Scalar> SquareMatrix<T> {
    /// Sum of diagonal elements.
    ///
    /// ```
    /// use hqr::SquareMatrix;
    /// let m = SquareMatrix::from_rows(2, &[1.0, 2.0, 3.0, 4.0]);
    /// assert_eq!(m.trace(), 5.0);
    /// ```
    pub fn trace(&self) -> T {
        let mut sum = T::zero();
        for i in 0..self.n {
            sum = sum + self[(i, i)];
        }
        sum
    }

    /// Copy of the main diagonal.
    ///
    /// ```
    /// use hqr::SquareMatrix;
    /// let m = SquareMatrix::from_rows(2, &[1.0, 2.0, 3.0, 4.0]);
    /// assert_eq!(m.diagonal(), vec![1.0, 4.0]);
    /// ```
    pub fn diagonal(&self) -> Vec<T> {
        (0..self.n).map(|i| self[(i, i)]).collect()
    }

    /// Copy of the first sub-diagonal, `m[(i + 1, i)]`.
    pub fn sub_diagonal(&self) -> Vec<T> {
        (1..self.n).map(|i| self[(i, i - 1)]).collect()
    }

    /// Check if the matrix is exactly symmetric (`A == A^T`).
    ///
    /// ```
    /// use hqr::SquareMatrix;
    /// let sym = SquareMatrix::from_rows(2, &[1.0, 2.0, 2.0, 3.0]);
    /// assert!(sym.is_symmetric());
    /// ```
    pub fn is_symmetric(&self) -> bool {
        let n = self.n;
        for j in 0..n {
            for i in (j + 1)..n {
                if self[(i, j)] != self[(j, i)] {
                    return false;
                }
            }
        }
        true
    }
}

impl<T: Copy> SquareMatrix<T> {
    /// Swap two columns in place.
    ///
    /// ```
    /// use hqr::SquareMatrix;
    /// let mut m = SquareMatrix::from_rows(2, &[1.0, 2.0, 3.0, 4.0]);
    /// m.swap_cols(0, 1);
    /// assert_eq!(m[(0, 0)], 2.0);
    /// assert_eq!(m[(0, 1)], 1.0);
    /// ```
    pub fn swap_cols(&mut self, a: usize, b: usize) {
        if a != b {
            let n = self.n;
            for i in 0..n {
                self.data.swap(a * n + i, b * n + i);
            }
        }
    }

    /// Swap two rows in place.
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a != b {
            let n = self.n;
            for j in 0..n {
                self.data.swap(j * n + a, j * n + b);
            }
        }
    }
}

impl<T: FloatScalar> SquareMatrix<T> {
    /// Frobenius norm of everything off the main diagonal.
    ///
    /// Zero for a diagonal matrix; used to measure how far a QR iteration
    /// result is from the eigenvalue matrix.
    pub fn off_diagonal_norm(&self) -> T {
        self.band_residual(0)
    }

    /// Frobenius norm of the entries outside the tridiagonal band.
    pub fn off_tridiagonal_norm(&self) -> T {
        self.band_residual(1)
    }

    fn band_residual(&self, bandwidth: usize) -> T {
        let n = self.n;
        let mut sum = T::zero();
        for j in 0..n {
            for i in 0..n {
                if i.abs_diff(j) > bandwidth {
                    let x = self[(i, j)];
                    sum = sum + x * x;
                }
            }
        }
        sum.sqrt()
    }
}

// ── Display ─────────────────────────────────────────────────────────

impl<T: fmt::Display> fmt::Display for SquareMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.n;

        // Measure column widths
        let mut widths: Vec<usize> = alloc::vec![0; n];
        for (j, width) in widths.iter_mut().enumerate() {
            for i in 0..n {
                let w = WriteCounting::count(|wc| write!(wc, "{}", self.data[j * n + i]));
                if w > *width {
                    *width = w;
                }
            }
        }

        for i in 0..n {
            write!(f, "│")?;
            for (j, width) in widths.iter().enumerate() {
                if j > 0 {
                    write!(f, "  ")?;
                }
                write!(f, "{:>width$}", self.data[j * n + i], width = *width)?;
            }
            write!(f, "│")?;
            if i + 1 < n {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

struct WriteCounting {
    count: usize,
}

impl WriteCounting {
    fn count(f: impl FnOnce(&mut Self) -> fmt::Result) -> usize {
        let mut wc = WriteCounting { count: 0 };
        let _ = f(&mut wc);
        wc.count
    }
}

impl fmt::Write for WriteCounting {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.count += s.chars().count();
        Ok(())
    }
}
