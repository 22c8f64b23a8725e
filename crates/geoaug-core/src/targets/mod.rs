//! Coordinate targets and the bundle that carries them.
//!
//! Bounding boxes and keypoints are moved by multiplying their coordinates
//! with the same matrix used to resample the image, so annotations stay on
//! the pixels they describe.

mod bbox;
mod bundle;
mod keypoint;

pub use bbox::{map_bbox, BoundingBox, BoxScheme};
pub(crate) use bbox::map_bbox_in_scheme;
pub use bundle::{TargetBundle, TargetKind};
pub use keypoint::{map_keypoint, Keypoint};

use crate::geometry::AffineMatrix;

/// Homogeneous point transform: `[x', y'] = matrix * [x, y, 1]`.
#[inline]
pub fn map_point(x: f64, y: f64, matrix: &AffineMatrix) -> (f64, f64) {
    matrix.transform_point(x, y)
}
