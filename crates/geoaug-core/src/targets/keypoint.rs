//! Keypoints with orientation metadata.

use serde::{Deserialize, Serialize};

use super::map_point;
use crate::geometry::AffineMatrix;
use crate::params::TransformParams;

/// A point with orientation (degrees) and scale.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Keypoint {
    pub x: f64,
    pub y: f64,
    pub angle: f64,
    pub scale: f64,
}

impl Keypoint {
    pub fn new(x: f64, y: f64, angle: f64, scale: f64) -> Self {
        Self { x, y, angle, scale }
    }

    /// A keypoint without orientation metadata.
    pub fn at(x: f64, y: f64) -> Self {
        Self::new(x, y, 0.0, 0.0)
    }

    /// Whether angle or scale carry information.
    pub fn has_orientation(&self) -> bool {
        self.angle != 0.0 || self.scale != 0.0
    }
}

/// Move a keypoint through `matrix`.
///
/// Position always follows the matrix. Orientation depends on the params:
/// a pure rotation adds its angle (wrapped to `[0, 360)`) and keeps the
/// scale; a general affine map has no well-defined effect on either, so
/// both are reset to 0.
pub fn map_keypoint(keypoint: &Keypoint, matrix: &AffineMatrix, params: &TransformParams) -> Keypoint {
    let (x, y) = map_point(keypoint.x, keypoint.y, matrix);
    match params.rotation_angle() {
        Some(angle) => Keypoint::new(x, y, wrap_degrees(keypoint.angle + angle), keypoint.scale),
        None => Keypoint::new(x, y, 0.0, 0.0),
    }
}

/// Wrap an angle into `[0, 360)`.
fn wrap_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}
