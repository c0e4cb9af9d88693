use alloc::vec::Vec;

use crate::linalg::householder::{householder_similarity, householder_vector, reflect_columns};
use crate::matrix::{SquareMatrix, SymmetricMatrix};
use crate::traits::{FloatScalar, MatrixRef};

/// Householder tridiagonalization in place.
///
/// Reduces the symmetric matrix `r` to tridiagonal form with `n − 2`
/// reflector similarity transforms. When `q` is given it is reset to the
/// identity and accumulates the product of the reflectors, so that on return
/// `qᵗ · original · q = r` (columns of `q` form the new basis).
///
/// Matrices smaller than 3×3 are already tridiagonal and left unchanged.
/// Columns that are already reduced (exactly zero below the sub-diagonal) are
/// skipped. Entries of any magnitude are reduced otherwise; reflectors are
/// built from scaled columns.
pub fn tridiagonalize_in_place<T: FloatScalar>(
    r: &mut SquareMatrix<T>,
    mut q: Option<&mut SquareMatrix<T>>,
) {
    let n = r.size();
    if let Some(q) = q.as_deref_mut() {
        if q.size() == n {
            q.set_identity();
        } else {
            *q = SquareMatrix::eye(n);
        }
    }
    if n < 3 {
        return;
    }

    let mut q_is_identity = true;
    for c in 0..n - 2 {
        // Already reduced below the sub-diagonal.
        if r.col_as_slice(c, c + 2).iter().all(|&x| x == T::zero()) {
            continue;
        }
        let mut v: Vec<T> = r.col_as_slice(c, c + 1).to_vec();
        let Ok(norm) = householder_vector(&mut v) else {
            continue;
        };

        householder_similarity(r, c + 1, &v, norm);

        // Entries outside the band are zero analytically; drop the rounding noise.
        for i in (c + 2)..n {
            r[(i, c)] = T::zero();
            r[(c, i)] = T::zero();
        }

        let Some(q) = q.as_deref_mut() else {
            continue;
        };
        if q_is_identity {
            // Q = I, so Q·H is H itself: write the reflector block directly.
            let two = T::one() + T::one();
            for (j, &vj) in v.iter().enumerate() {
                for (i, &vi) in v.iter().enumerate() {
                    let id = if i == j { T::one() } else { T::zero() };
                    q[(c + 1 + i, c + 1 + j)] = id - two * vi * vj / norm;
                }
            }
            q_is_identity = false;
        } else {
            reflect_columns(q, c + 1, &v, norm);
        }
    }
}

/// Result of [`tridiagonalize`]: the tridiagonal matrix `T` and, optionally,
/// the orthogonal `Q` with `Qᵗ·A·Q = T`.
///
/// # Example
///
/// ```
/// use hqr::SymmetricMatrix;
/// use hqr::linalg::tridiagonalize;
///
/// let a = SymmetricMatrix::from_lower(3, &[
///     4.0_f64,
///     1.0, 2.0,
///     -2.0, 0.0, 3.0,
/// ]);
/// let td = tridiagonalize(&a, true);
/// assert!(td.matrix()[(2, 0)].abs() < 1e-12);
///
/// // The trace is a similarity invariant.
/// let trace: f64 = td.diagonal().iter().sum();
/// assert!((trace - 9.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct Tridiagonal<T> {
    matrix: SquareMatrix<T>,
    q: Option<SquareMatrix<T>>,
}

impl<T: FloatScalar> Tridiagonal<T> {
    /// The tridiagonal matrix.
    #[inline]
    pub fn matrix(&self) -> &SquareMatrix<T> {
        &self.matrix
    }

    /// The accumulated orthogonal factor, if it was requested.
    #[inline]
    pub fn q(&self) -> Option<&SquareMatrix<T>> {
        self.q.as_ref()
    }

    /// Main diagonal of the tridiagonal matrix.
    pub fn diagonal(&self) -> Vec<T> {
        self.matrix.diagonal()
    }

    /// Sub-diagonal of the tridiagonal matrix (`t[(i + 1, i)]`).
    pub fn off_diagonal(&self) -> Vec<T> {
        self.matrix.sub_diagonal()
    }

    /// Consume into `(T, Q)`.
    pub fn into_parts(self) -> (SquareMatrix<T>, Option<SquareMatrix<T>>) {
        (self.matrix, self.q)
    }
}

/// Reduce a symmetric matrix to tridiagonal form.
///
/// The source is cloned into a working matrix and left untouched. With
/// `with_q` the orthogonal factor is accumulated as well.
pub fn tridiagonalize<T: FloatScalar>(a: &SymmetricMatrix<T>, with_q: bool) -> Tridiagonal<T> {
    let mut matrix = a.to_square();
    let mut q = with_q.then(|| SquareMatrix::eye(a.size()));
    tridiagonalize_in_place(&mut matrix, q.as_mut());
    Tridiagonal { matrix, q }
}

/// Convenience method for tridiagonalization.
impl<T: FloatScalar> SymmetricMatrix<T> {
    /// Householder tridiagonalization, see [`tridiagonalize`].
    ///
    /// ```
    /// use hqr::SymmetricMatrix;
    /// let a = SymmetricMatrix::<f64>::eye(4);
    /// let td = a.tridiagonalize(true);
    /// assert_eq!(td.diagonal(), vec![1.0; 4]);
    /// ```
    pub fn tridiagonalize(&self, with_q: bool) -> Tridiagonal<T> {
        tridiagonalize(self, with_q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
        assert!(
            (a - b).abs() < tol,
            "{}: {} vs {} (diff {})",
            msg,
            a,
            b,
            (a - b).abs()
        );
    }

    fn assert_orthogonal(q: &SquareMatrix<f64>) {
        let n = q.size();
        let qtq = &q.transpose() * q;
        for i in 0..n {
            for j in 0..n {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_near(qtq[(i, j)], expected, TOL, &alloc::format!("QtQ[({},{})]", i, j));
            }
        }
    }

    fn assert_similar(a: &SymmetricMatrix<f64>, td: &Tridiagonal<f64>) {
        let q = td.q().unwrap();
        let qtaq = &(&q.transpose() * &a.to_square()) * q;
        let t = td.matrix();
        for i in 0..a.size() {
            for j in 0..a.size() {
                assert_near(qtaq[(i, j)], t[(i, j)], TOL, &alloc::format!("QtAQ[({},{})]", i, j));
            }
        }
    }

    fn frobenius(m: &SquareMatrix<f64>) -> f64 {
        m.as_slice().iter().map(|x| x * x).sum::<f64>().sqrt()
    }

    #[test]
    fn tridiagonalize_3x3() {
        let a = SymmetricMatrix::from_lower(3, &[4.0, 1.0, 2.0, -2.0, 0.0, 3.0]);
        let td = tridiagonalize(&a, true);
        assert_eq!(td.matrix().off_tridiagonal_norm(), 0.0);
        assert_orthogonal(td.q().unwrap());
        assert_similar(&a, &td);
    }

    #[test]
    fn tridiagonalize_5x5() {
        let a = SymmetricMatrix::from_fn(5, |i, j| 1.0 / ((i + j + 1) as f64) + if i == j { 2.0 } else { 0.0 });
        let td = tridiagonalize(&a, true);
        let t = td.matrix();
        assert_eq!(t.off_tridiagonal_norm(), 0.0);
        for i in 0..5 {
            for j in 0..5 {
                assert_near(t[(i, j)], t[(j, i)], TOL, "symmetry");
            }
        }
        assert_orthogonal(td.q().unwrap());
        assert_similar(&a, &td);

        // Similarity invariants
        let src = a.to_square();
        assert_near(t.trace(), src.trace(), TOL, "trace");
        assert_near(frobenius(t), frobenius(&src), TOL, "frobenius");
    }

    #[test]
    fn without_q_gives_same_matrix() {
        let a = SymmetricMatrix::from_fn(4, |i, j| (i as f64 - j as f64).cos() + (i * j) as f64);
        let with = tridiagonalize(&a, true);
        let without = tridiagonalize(&a, false);
        assert!(without.q().is_none());
        assert_eq!(with.matrix(), without.matrix());
    }

    #[test]
    fn small_sizes_untouched() {
        for n in 0..3 {
            let a = SymmetricMatrix::from_fn(n, |i, j| (i + j + 1) as f64);
            let td = tridiagonalize(&a, true);
            assert_eq!(td.matrix(), &a.to_square());
            assert_eq!(td.q().unwrap(), &SquareMatrix::eye(n));
        }
    }

    #[test]
    fn diagonal_input_skips_every_pivot() {
        let a = SymmetricMatrix::from_diag(&[5.0, 3.0, 1.0, 7.0]);
        let td = tridiagonalize(&a, true);
        assert_eq!(td.matrix(), &a.to_square());
        assert_eq!(td.q().unwrap(), &SquareMatrix::eye(4));
    }

    #[test]
    fn first_reflector_after_skipped_pivot() {
        // Column 0 is already reduced; the first reflector appears at pivot 1.
        let a = SymmetricMatrix::from_lower(4, &[
            2.0,
            1.0, 3.0,
            0.0, 1.0, 4.0,
            0.0, 2.0, 1.0, 5.0,
        ]);
        let td = tridiagonalize(&a, true);
        assert_eq!(td.matrix().off_tridiagonal_norm(), 0.0);
        assert_orthogonal(td.q().unwrap());
        assert_similar(&a, &td);
    }

    #[test]
    fn tiny_and_huge_entries_are_reduced() {
        let base = [4.0, 1.0, 2.0, -2.0, 0.0, 3.0];
        for scale in [1e-170_f64, 1e160] {
            let lower: Vec<f64> = base.iter().map(|x| x * scale).collect();
            let a = SymmetricMatrix::from_lower(3, &lower);
            let td = tridiagonalize(&a, true);
            let t = td.matrix();
            assert_eq!(t[(2, 0)], 0.0);
            assert!(t[(1, 0)].abs() > scale, "sub-diagonal {} at scale {}", t[(1, 0)], scale);
            assert_near(t.trace() / scale, 9.0, TOL, "trace");
            assert_orthogonal(td.q().unwrap());

            // Qᵗ·A·Q = T, relative to the scale
            let q = td.q().unwrap();
            let qtaq = &(&q.transpose() * &a.to_square()) * q;
            for i in 0..3 {
                for j in 0..3 {
                    assert_near(qtaq[(i, j)] / scale, t[(i, j)] / scale, TOL, "QtAQ");
                }
            }
        }
    }

    #[test]
    fn in_place_reuses_q() {
        let mut r = SymmetricMatrix::from_fn(4, |i, j| (i + 2 * j) as f64 + 1.0).to_square();
        let mut q = SquareMatrix::from_fn(2, |_, _| 9.0);
        tridiagonalize_in_place(&mut r, Some(&mut q));
        assert_eq!(q.size(), 4);
        assert_orthogonal(&q);
    }

    #[test]
    fn f32_support() {
        let a = SymmetricMatrix::from_lower(3, &[4.0_f32, 1.0, 2.0, -2.0, 0.0, 3.0]);
        let td = tridiagonalize(&a, false);
        assert_eq!(td.matrix()[(2, 0)], 0.0);
        let trace: f32 = td.diagonal().iter().sum();
        assert!((trace - 9.0).abs() < 1e-5);
    }
}
