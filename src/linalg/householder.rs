use alloc::vec;

use crate::linalg::LinalgError;
use crate::traits::{FloatScalar, MatrixMut};

#[inline]
fn dot<T: FloatScalar>(a: &[T], b: &[T]) -> T {
    a.iter().zip(b).fold(T::zero(), |acc, (&x, &y)| acc + x * y)
}

/// Turn `x` into the Householder vector that reflects it onto the first axis.
///
/// `x` is first divided by its largest magnitude, so the norm neither
/// overflows nor underflows; the reflector does not depend on the scale of
/// `v`. On return `x` holds `v ∝ x ± ||x|| e₀`, the sign chosen to match
/// `x[0]` so the leading entry never cancels. Reflecting the original `x`
/// along `v` gives `(∓||x||, 0, …, 0)`. Returns `v·v`, the denominator of
/// `H = I − 2vvᵗ/(v·v)`, consistent with the `v` left in `x`.
///
/// A zero `x` yields `v·v == 0`: the column needs no reflection.
///
/// ```
/// use hqr::linalg::householder_vector;
///
/// let mut x = [3.0_f64, 4.0];
/// let vv = householder_vector(&mut x).unwrap();
/// // (3, 4)/4 + (1.25, 0)
/// assert_eq!(x, [2.0, 1.0]);
/// assert_eq!(vv, 5.0);
/// ```
pub fn householder_vector<T: FloatScalar>(x: &mut [T]) -> Result<T, LinalgError> {
    if x.is_empty() {
        return Err(LinalgError::EmptyVector);
    }
    let scale = x.iter().fold(T::zero(), |m, &xi| m.max(xi.abs()));
    if scale == T::zero() {
        return Ok(T::zero());
    }
    for xi in x.iter_mut() {
        *xi = *xi / scale;
    }

    let norm = dot(x, x).sqrt();
    if x[0] > T::zero() {
        x[0] = x[0] + norm;
    } else {
        x[0] = x[0] - norm;
    }
    Ok(dot(x, x))
}

/// Left-multiply by the reflector: `m ← H·m`, where `H = I − 2vvᵗ/norm` acts
/// on rows `col..col + v.len()`. Rows above `col` are untouched.
pub fn reflect_rows<T: FloatScalar>(m: &mut impl MatrixMut<T>, col: usize, v: &[T], norm: T) {
    assert_eq!(v.len(), m.nrows() - col, "reflector length must equal nrows - col");
    let two = T::one() + T::one();
    for j in 0..m.ncols() {
        // Column-major: m[col.., j] is contiguous
        let column = m.col_as_mut_slice(j, col);
        let f = two * dot(column, v) / norm;
        for (x, &vi) in column.iter_mut().zip(v) {
            *x = *x - f * vi;
        }
    }
}

/// Right-multiply by the reflector: `m ← m·H`, where `H` acts on columns
/// `col..col + v.len()`. Columns before `col` are untouched.
///
/// Also used to accumulate the orthogonal factor: `Q ← Q·H`.
pub fn reflect_columns<T: FloatScalar>(m: &mut impl MatrixMut<T>, col: usize, v: &[T], norm: T) {
    assert_eq!(v.len(), m.ncols() - col, "reflector length must equal ncols - col");
    let two = T::one() + T::one();
    let nrows = m.nrows();

    // w = m[:, col..] * v
    let mut w = vec![T::zero(); nrows];
    for (k, &vk) in v.iter().enumerate() {
        if vk == T::zero() {
            continue;
        }
        for (wi, &x) in w.iter_mut().zip(m.col_as_slice(col + k, 0)) {
            *wi = *wi + x * vk;
        }
    }

    // m[:, col..] -= (2/norm) * w * vᵗ
    for (k, &vk) in v.iter().enumerate() {
        let f = two * vk / norm;
        for (x, &wi) in m.col_as_mut_slice(col + k, 0).iter_mut().zip(&w) {
            *x = *x - f * wi;
        }
    }
}

/// Householder similarity transform `m ← H·m·H` below a pivot.
///
/// `v` (length `n − col`) and `norm = v·v` come from [`householder_vector`].
/// Rows and columns above `col` are already final and pass through; the
/// left product is formed first, then the right product, each pass reading a
/// column's inner product with `v` before writing that column.
///
/// ```
/// use hqr::SquareMatrix;
/// use hqr::linalg::{householder_similarity, householder_vector};
///
/// let mut m = SquareMatrix::from_rows(3, &[
///     4.0_f64, 1.0, 2.0,
///     1.0, 2.0, 0.0,
///     2.0, 0.0, 3.0,
/// ]);
/// let mut v = vec![m[(1, 0)], m[(2, 0)]];
/// let norm = householder_vector(&mut v).unwrap();
/// householder_similarity(&mut m, 1, &v, norm);
/// assert!(m[(2, 0)].abs() < 1e-12);
/// assert!((m.trace() - 9.0).abs() < 1e-12);
/// ```
pub fn householder_similarity<T: FloatScalar>(
    m: &mut impl MatrixMut<T>,
    col: usize,
    v: &[T],
    norm: T,
) {
    let n = m.nrows();
    assert_eq!(n, m.ncols(), "similarity transform requires a square matrix");
    assert!(col <= n, "pivot {} out of range for {}x{} matrix", col, n, n);
    debug_assert!(norm != T::zero(), "reflector norm must be non-zero");

    reflect_rows(m, col, v, norm);
    reflect_columns(m, col, v, norm);
}
