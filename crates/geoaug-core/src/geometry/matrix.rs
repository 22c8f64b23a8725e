//! 2x3 affine matrices.

use serde::{Deserialize, Serialize};

use crate::error::{AugmentError, Result};

/// Row-major 2x3 affine matrix `[a, b, c, d, e, f]` mapping
/// `(x, y) -> (a*x + b*y + c, d*x + e*y + f)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineMatrix(pub [f64; 6]);

impl Default for AffineMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl AffineMatrix {
    /// The identity mapping.
    pub const fn identity() -> Self {
        Self([1.0, 0.0, 0.0, 0.0, 1.0, 0.0])
    }

    /// Rotation about `center` by `angle_degrees` (positive = counter-clockwise
    /// on screen, since y points down) with uniform `scale`.
    ///
    /// ```text
    /// | alpha  beta  (1 - alpha) * cx - beta * cy |
    /// | -beta  alpha beta * cx + (1 - alpha) * cy |
    /// ```
    ///
    /// where `alpha = scale * cos(angle)` and `beta = scale * sin(angle)`.
    pub fn rotation(center: (f64, f64), angle_degrees: f64, scale: f64) -> Self {
        let angle = angle_degrees.to_radians();
        let alpha = scale * angle.cos();
        let beta = scale * angle.sin();
        let (cx, cy) = center;

        Self([
            alpha,
            beta,
            (1.0 - alpha) * cx - beta * cy,
            -beta,
            alpha,
            beta * cx + (1.0 - alpha) * cy,
        ])
    }

    /// Solve for the matrix mapping three source points onto three
    /// destination points.
    ///
    /// # Errors
    ///
    /// [`AugmentError::InvalidParameter`] if the source points are collinear.
    pub fn from_point_pairs(src: [(f64, f64); 3], dst: [(f64, f64); 3]) -> Result<Self> {
        let [(x0, y0), (x1, y1), (x2, y2)] = src;
        let det = x0 * (y1 - y2) - y0 * (x1 - x2) + (x1 * y2 - x2 * y1);
        if det.abs() < f64::EPSILON {
            return Err(AugmentError::InvalidParameter(
                "affine control points are collinear".to_string(),
            ));
        }

        // Cramer's rule, once per output coordinate.
        let solve = |r0: f64, r1: f64, r2: f64| -> [f64; 3] {
            let a = r0 * (y1 - y2) - y0 * (r1 - r2) + (r1 * y2 - r2 * y1);
            let b = x0 * (r1 - r2) - r0 * (x1 - x2) + (x1 * r2 - x2 * r1);
            let c = x0 * (y1 * r2 - y2 * r1) - y0 * (x1 * r2 - x2 * r1) + r0 * (x1 * y2 - x2 * y1);
            [a / det, b / det, c / det]
        };

        let [a, b, c] = solve(dst[0].0, dst[1].0, dst[2].0);
        let [d, e, f] = solve(dst[0].1, dst[1].1, dst[2].1);
        Ok(Self([a, b, c, d, e, f]))
    }

    /// Determinant of the linear part.
    pub fn determinant(&self) -> f64 {
        let [a, b, _, d, e, _] = self.0;
        a * e - b * d
    }

    /// Invert the mapping.
    ///
    /// A singular matrix inverts to all zeros, so every destination pixel
    /// samples the source origin instead of producing NaNs.
    pub fn inverse(&self) -> Self {
        let [a, b, c, d, e, f] = self.0;
        let det = self.determinant();
        let inv_det = if det != 0.0 { 1.0 / det } else { 0.0 };

        let new_a = e * inv_det;
        let new_b = -b * inv_det;
        let new_d = -d * inv_det;
        let new_e = a * inv_det;
        let new_c = -(new_a * c + new_b * f);
        let new_f = -(new_d * c + new_e * f);

        Self([new_a, new_b, new_c, new_d, new_e, new_f])
    }

    /// Apply the matrix to a point.
    #[inline]
    pub fn transform_point(&self, x: f64, y: f64) -> (f64, f64) {
        let [a, b, c, d, e, f] = self.0;
        (a * x + b * y + c, d * x + e * y + f)
    }

    /// Return a copy with `(dx, dy)` added to the translation.
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        let mut m = self.0;
        m[2] += dx;
        m[5] += dy;
        Self(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_point_eq(actual: (f64, f64), expected: (f64, f64)) {
        assert_abs_diff_eq!(actual.0, expected.0, epsilon = 1e-9);
        assert_abs_diff_eq!(actual.1, expected.1, epsilon = 1e-9);
    }

    #[test]
    fn test_identity_maps_points_to_themselves() {
        let m = AffineMatrix::identity();
        assert_eq!(m.transform_point(3.5, -2.0), (3.5, -2.0));
    }

    #[test]
    fn test_rotation_zero_is_exact_identity() {
        let m = AffineMatrix::rotation((49.5, 29.5), 0.0, 1.0);
        assert_eq!(m, AffineMatrix::identity());
    }

    #[test]
    fn test_rotation_keeps_center_fixed() {
        let m = AffineMatrix::rotation((10.0, 20.0), 37.0, 1.0);
        assert_point_eq(m.transform_point(10.0, 20.0), (10.0, 20.0));
    }

    #[test]
    fn test_rotation_90_is_counter_clockwise_on_screen() {
        // A point to the right of the centre moves above it (y points down).
        let m = AffineMatrix::rotation((0.0, 0.0), 90.0, 1.0);
        assert_point_eq(m.transform_point(1.0, 0.0), (0.0, -1.0));
        assert_point_eq(m.transform_point(0.0, 1.0), (1.0, 0.0));
    }

    #[test]
    fn test_inverse_round_trip() {
        let m = AffineMatrix([1.2, 0.3, 5.0, -0.4, 0.9, -2.0]);
        let inv = m.inverse();
        let (x, y) = m.transform_point(7.0, 11.0);
        assert_point_eq(inv.transform_point(x, y), (7.0, 11.0));
    }

    #[test]
    fn test_inverse_of_singular_is_zero() {
        let m = AffineMatrix([1.0, 2.0, 3.0, 2.0, 4.0, 6.0]);
        assert_eq!(m.determinant(), 0.0);
        assert_eq!(m.inverse(), AffineMatrix([0.0; 6]));
    }

    #[test]
    fn test_from_point_pairs_recovers_matrix() {
        let expected = AffineMatrix([0.8, -0.2, 4.0, 0.1, 1.3, -7.0]);
        let src = [(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)];
        let dst = src.map(|(x, y)| expected.transform_point(x, y));

        let solved = AffineMatrix::from_point_pairs(src, dst).unwrap();
        for (s, e) in solved.0.iter().zip(expected.0.iter()) {
            assert_abs_diff_eq!(*s, *e, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_from_point_pairs_identity() {
        let src = [(60.0, 60.0), (60.0, 20.0), (20.0, 20.0)];
        let solved = AffineMatrix::from_point_pairs(src, src).unwrap();
        for (s, e) in solved.0.iter().zip(AffineMatrix::identity().0.iter()) {
            assert_abs_diff_eq!(*s, *e, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_from_point_pairs_rejects_collinear() {
        let src = [(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)];
        let err = AffineMatrix::from_point_pairs(src, src).unwrap_err();
        assert!(matches!(err, AugmentError::InvalidParameter(_)));
    }

    #[test]
    fn test_translated() {
        let m = AffineMatrix::identity().translated(3.0, -4.0);
        assert_eq!(m.transform_point(1.0, 1.0), (4.0, -3.0));
    }
}
