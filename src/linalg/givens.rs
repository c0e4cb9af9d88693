use crate::matrix::SquareMatrix;
use crate::traits::FloatScalar;

/// Givens rotation: compute `(c, s)` such that `[c, s; -s, c] * [a; b] = [r; 0]`
/// with `r = hypot(a, b) ≥ 0`.
///
/// ```
/// use hqr::linalg::givens;
/// let (c, s) = givens(3.0_f64, 4.0);
/// assert!((c - 0.6).abs() < 1e-15);
/// assert!((s - 0.8).abs() < 1e-15);
/// ```
#[inline]
pub fn givens<T: FloatScalar>(a: T, b: T) -> (T, T) {
    if b == T::zero() {
        return (T::one(), T::zero());
    }
    let d = a.hypot(b);
    (a / d, b / d)
}

/// One QR decomposition step of a tridiagonal matrix by Givens rotations.
///
/// Rotations `G₀ … G_{sz−1}` zero the sub-diagonal of the active block
/// (rows/columns `0..=sz`), leaving the upper-triangular factor `R` in `r`.
/// Only the band is touched: each rotation updates rows `i, i+1` over
/// columns `i ..= i+2`. Sub-diagonal entries that are already zero are
/// skipped.
///
/// When `q` is given it is reset to the identity and receives the rotation
/// factor. **Postcondition:** `q` is returned transposed, i.e.
/// `q = (G_{sz−1}⋯G₀)ᵗ`, so that `r_old = q · R`. Callers finish the
/// similarity step themselves with `r *= q` (giving `qᵗ · r_old · q`) and
/// accumulate eigenvectors with `Q *= q`; keep that multiplication order or
/// the basis comes out transposed.
///
/// # Example
///
/// ```
/// use hqr::SquareMatrix;
/// use hqr::linalg::givens_qr_step;
///
/// let t = SquareMatrix::from_rows(3, &[
///     2.0_f64, 1.0, 0.0,
///     1.0, 2.0, 1.0,
///     0.0, 1.0, 2.0,
/// ]);
/// let mut r = t.clone();
/// let mut q = SquareMatrix::zeros(3);
/// givens_qr_step(&mut r, Some(&mut q), 2);
/// assert_eq!(r[(1, 0)], 0.0);
/// assert_eq!(r[(2, 1)], 0.0);
///
/// // q·R reproduces the input
/// let qr = &q * &r;
/// assert!((qr[(2, 1)] - 1.0).abs() < 1e-12);
/// ```
pub fn givens_qr_step<T: FloatScalar>(
    r: &mut SquareMatrix<T>,
    mut q: Option<&mut SquareMatrix<T>>,
    sz: usize,
) {
    let n = r.size();
    if let Some(q) = q.as_deref_mut() {
        if q.size() == n {
            q.set_identity();
        } else {
            *q = SquareMatrix::eye(n);
        }
    }
    if n < 2 {
        return;
    }
    assert!(sz < n, "active range {} out of bounds for {}x{} matrix", sz, n, n);

    for i in 0..sz {
        if r[(i + 1, i)] == T::zero() {
            continue;
        }
        let (cos, sin) = givens(r[(i, i)], r[(i + 1, i)]);

        // Rotate rows i, i+1 across the band.
        for j in i..(i + 3).min(n) {
            let d1 = r[(i, j)];
            let d2 = r[(i + 1, j)];
            r[(i, j)] = d1 * cos + d2 * sin;
            r[(i + 1, j)] = d2 * cos - d1 * sin;
        }
        r[(i + 1, i)] = T::zero();

        let Some(q) = q.as_deref_mut() else {
            continue;
        };
        if i == 0 {
            q[(0, 0)] = cos;
            q[(1, 1)] = cos;
            q[(0, 1)] = sin;
            q[(1, 0)] = -sin;
        } else {
            for c in 0..n {
                let d1 = q[(i, c)];
                let d2 = q[(i + 1, c)];
                q[(i, c)] = d1 * cos + d2 * sin;
                q[(i + 1, c)] = d2 * cos - d1 * sin;
            }
        }
    }

    if let Some(q) = q {
        q.transpose_in_place();
    }
}
