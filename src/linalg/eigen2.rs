use crate::linalg::LinalgError;
use crate::traits::FloatScalar;

/// Eigenvalue of the 2×2 block `[a, b; c, d]` nearest to `d`.
///
/// Solves `λ² − (a + d)λ + (ad − bc) = 0` in closed form and returns the
/// root closer to the bottom-right entry, the usual shift choice for QR
/// iteration. The discriminant `tr² − 4·det` is evaluated as
/// `(a − d)² + 4bc`, which is the same quantity without the cancellation.
/// The block is divided by its largest magnitude first so the squares
/// cannot overflow, and the root is scaled back.
///
/// Returns [`LinalgError::ComplexEigenvalues`] if the discriminant is
/// negative. That cannot happen for a symmetric block (`b == c`).
///
/// ```
/// use hqr::linalg::eigenvalue_2x2;
///
/// // Eigenvalues 5 and 3; 3 is nearer to d = 3.
/// let l = eigenvalue_2x2(5.0_f64, 0.0, 0.0, 3.0).unwrap();
/// assert!((l - 3.0).abs() < 1e-14);
///
/// // Rotation block: complex pair.
/// assert!(eigenvalue_2x2(0.0_f64, -1.0, 1.0, 0.0).is_err());
/// ```
pub fn eigenvalue_2x2<T: FloatScalar>(a: T, b: T, c: T, d: T) -> Result<T, LinalgError> {
    let scale = a.abs().max(b.abs()).max(c.abs()).max(d.abs());
    if scale == T::zero() {
        return Ok(T::zero());
    }
    let (a, b, c, d) = (a / scale, b / scale, c / scale, d / scale);

    let two = T::one() + T::one();
    let four = two + two;

    let trace = a + d;
    let diff = a - d;
    let disc = diff * diff + four * b * c;
    if disc < T::zero() {
        return Err(LinalgError::ComplexEigenvalues);
    }

    let root = disc.sqrt();
    let l1 = (trace + root) / two;
    let l2 = (trace - root) / two;

    if (d - l1).abs() < (d - l2).abs() {
        Ok(l1 * scale)
    } else {
        Ok(l2 * scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn symmetric_block() {
        // [[2,1],[1,2]] has eigenvalues 1 and 3, equidistant from d = 2.
        let l = eigenvalue_2x2(2.0_f64, 1.0, 1.0, 2.0).unwrap();
        assert!((l - 1.0).abs() < TOL || (l - 3.0).abs() < TOL);

        // [[4,1],[1,1]]: (5 ± √13)/2, nearer to 1 is the smaller one
        let l = eigenvalue_2x2(4.0_f64, 1.0, 1.0, 1.0).unwrap();
        assert!((l - (5.0 - 13.0_f64.sqrt()) / 2.0).abs() < TOL);
    }

    #[test]
    fn picks_root_nearest_bottom_right() {
        assert!((eigenvalue_2x2(1.0_f64, 0.0, 0.0, 7.0).unwrap() - 7.0).abs() < TOL);
        assert!((eigenvalue_2x2(7.0_f64, 0.0, 0.0, 1.0).unwrap() - 1.0).abs() < TOL);
    }

    #[test]
    fn result_is_a_root() {
        let (a, b, c, d) = (3.0_f64, -2.0, -2.0, -1.0);
        let l = eigenvalue_2x2(a, b, c, d).unwrap();
        let char_poly = l * l - (a + d) * l + (a * d - b * c);
        assert!(char_poly.abs() < 1e-10);
    }

    #[test]
    fn repeated_eigenvalue() {
        assert_eq!(eigenvalue_2x2(2.0_f64, 0.0, 0.0, 2.0).unwrap(), 2.0);
        assert_eq!(eigenvalue_2x2(0.0_f64, 0.0, 0.0, 0.0).unwrap(), 0.0);
    }

    #[test]
    fn large_and_small_blocks() {
        // Eigenvalues (3 ± √5)/2 · s; the one nearer 2s is the larger.
        let expected = (3.0 + 5.0_f64.sqrt()) / 2.0;
        for s in [1e160_f64, 1e-160, 1.0] {
            let l = eigenvalue_2x2(s, s, s, 2.0 * s).unwrap();
            assert!(l.is_finite(), "scale {}: {}", s, l);
            assert!((l / s - expected).abs() < TOL, "scale {}: {}", s, l / s);
        }
    }

    #[test]
    fn negative_discriminant() {
        assert_eq!(
            eigenvalue_2x2(1.0_f64, 2.0, -3.0, 1.0),
            Err(LinalgError::ComplexEigenvalues)
        );
    }

    #[test]
    fn f32_support() {
        let l = eigenvalue_2x2(2.0_f32, 1.0, 1.0, 2.0).unwrap();
        assert!((l - 1.0).abs() < 1e-6 || (l - 3.0).abs() < 1e-6);
    }
}
