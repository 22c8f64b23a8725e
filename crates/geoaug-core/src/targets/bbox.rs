//! Axis-aligned bounding boxes.

use serde::{Deserialize, Serialize};

use super::map_point;
use crate::geometry::{AffineMatrix, CanvasSize};

/// Axis-aligned box `(x_min, y_min, x_max, y_max)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl BoundingBox {
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Zero (or negative) area. Such boxes are kept; callers filter them.
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Corners in clockwise order starting at the top-left.
    pub fn corners(&self) -> [(f64, f64); 4] {
        [
            (self.x_min, self.y_min),
            (self.x_max, self.y_min),
            (self.x_max, self.y_max),
            (self.x_min, self.y_max),
        ]
    }

    fn scaled(&self, sx: f64, sy: f64) -> Self {
        Self::new(self.x_min * sx, self.y_min * sy, self.x_max * sx, self.y_max * sy)
    }

    fn clamped(&self, max_x: f64, max_y: f64) -> Self {
        Self::new(
            self.x_min.clamp(0.0, max_x),
            self.y_min.clamp(0.0, max_y),
            self.x_max.clamp(0.0, max_x),
            self.y_max.clamp(0.0, max_y),
        )
    }
}

/// Units of box coordinates in a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoxScheme {
    /// Pixel coordinates addressing pixel centres.
    #[default]
    Pixel,
    /// Pixel coordinates divided by the raster extent.
    Normalized,
}

/// Map a pixel-space box and re-enclose it.
///
/// All four corners go through `matrix`, the axis-aligned envelope of the
/// result is taken, and each axis is clipped to the pixel centres of the
/// canvas (`0..=extent-1`). A box that leaves the canvas collapses to zero
/// area instead of being dropped.
pub fn map_bbox(bbox: &BoundingBox, matrix: &AffineMatrix, canvas: CanvasSize) -> BoundingBox {
    let max_x = canvas.width.saturating_sub(1) as f64;
    let max_y = canvas.height.saturating_sub(1) as f64;
    envelope(bbox, matrix).clamped(max_x, max_y)
}

/// Map a box expressed in `scheme` from a `source` extent onto `canvas`.
///
/// Normalized boxes are clipped to `[0, 1]` after renormalizing, so a box
/// touching the right or bottom edge keeps touching it.
pub(crate) fn map_bbox_in_scheme(
    bbox: &BoundingBox,
    matrix: &AffineMatrix,
    source: (u32, u32),
    canvas: CanvasSize,
    scheme: BoxScheme,
) -> BoundingBox {
    match scheme {
        BoxScheme::Pixel => map_bbox(bbox, matrix, canvas),
        BoxScheme::Normalized => {
            let pixels = bbox.scaled(source.0 as f64, source.1 as f64);
            let mapped = envelope(&pixels, matrix);
            let (width, height) = (canvas.width as f64, canvas.height as f64);
            BoundingBox::new(
                mapped.x_min / width,
                mapped.y_min / height,
                mapped.x_max / width,
                mapped.y_max / height,
            )
            .clamped(1.0, 1.0)
        }
    }
}

/// Axis-aligned envelope of the mapped corners, unclipped.
fn envelope(bbox: &BoundingBox, matrix: &AffineMatrix) -> BoundingBox {
    let corners = bbox.corners().map(|(x, y)| map_point(x, y, matrix));

    let (mut x_min, mut y_min) = (f64::INFINITY, f64::INFINITY);
    let (mut x_max, mut y_max) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for (x, y) in corners {
        x_min = x_min.min(x);
        y_min = y_min.min(y);
        x_max = x_max.max(x);
        y_max = y_max.max(y);
    }
    BoundingBox::new(x_min, y_min, x_max, y_max)
}
