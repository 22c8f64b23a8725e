//! Output canvas sizing.

use serde::{Deserialize, Serialize};

/// Slack allowed before a fractional extent rounds up to the next pixel.
const EXTENT_TOLERANCE: f64 = 1e-6;

/// Angles this close (in degrees) to a multiple of 90 use exact extents.
const RIGHT_ANGLE_TOLERANCE: f64 = 1e-9;

/// Output raster extent in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl From<(u32, u32)> for CanvasSize {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

/// Round a continuous extent up to whole pixels (at least one).
///
/// Values within [`EXTENT_TOLERANCE`] above an integer round down to it, so
/// trigonometric noise like `100.00000000000001` does not add a pixel.
pub(crate) fn whole_pixels(extent: f64) -> u32 {
    ((extent - EXTENT_TOLERANCE).ceil().max(1.0)) as u32
}

/// Compute the canvas that contains a `width` x `height` raster rotated by
/// `angle_degrees`.
///
/// ```text
/// out_w = h * |sin θ| + w * |cos θ|
/// out_h = w * |sin θ| + h * |cos θ|
/// ```
///
/// # Example
///
/// ```
/// use geoaug_core::geometry::rotated_canvas;
///
/// // 90-degree rotation swaps dimensions
/// let canvas = rotated_canvas(100, 50, 90.0);
/// assert_eq!((canvas.width, canvas.height), (50, 100));
/// ```
pub fn rotated_canvas(width: u32, height: u32, angle_degrees: f64) -> CanvasSize {
    let abs_angle = (angle_degrees % 360.0).abs();
    let near = |target: f64| (abs_angle - target).abs() < RIGHT_ANGLE_TOLERANCE;

    // Fast paths: multiples of 90 degrees have exact extents
    if near(0.0) || near(180.0) || near(360.0) {
        return CanvasSize::new(width, height);
    }
    if near(90.0) || near(270.0) {
        return CanvasSize::new(height, width);
    }

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos().abs();
    let sin = angle_rad.sin().abs();

    let w = width as f64;
    let h = height as f64;

    CanvasSize::new(whole_pixels(h * sin + w * cos), whole_pixels(w * sin + h * cos))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: the canvas always contains the rotated source rectangle.
        #[test]
        fn prop_canvas_contains_rotated_rect(
            width in 1u32..=400,
            height in 1u32..=400,
            angle in -360.0f64..=360.0,
        ) {
            let canvas = rotated_canvas(width, height, angle);
            let rad = angle.to_radians();
            let (sin, cos) = (rad.sin().abs(), rad.cos().abs());
            let need_w = height as f64 * sin + width as f64 * cos;
            let need_h = width as f64 * sin + height as f64 * cos;

            prop_assert!(canvas.width as f64 >= need_w - 1e-3, "{} < {}", canvas.width, need_w);
            prop_assert!(canvas.height as f64 >= need_h - 1e-3, "{} < {}", canvas.height, need_h);
        }

        /// Property: the canvas never adds more than one pixel of slack.
        #[test]
        fn prop_canvas_is_tight(
            width in 1u32..=400,
            height in 1u32..=400,
            angle in -180.0f64..=180.0,
        ) {
            let canvas = rotated_canvas(width, height, angle);
            let rad = angle.to_radians();
            let (sin, cos) = (rad.sin().abs(), rad.cos().abs());
            let need_w = height as f64 * sin + width as f64 * cos;

            prop_assert!((canvas.width as f64) < need_w.max(1.0) + 1.0);
        }
    }
}
