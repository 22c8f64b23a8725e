//! Matrix and canvas construction for each transform kind.

use log::trace;

use super::canvas::{rotated_canvas, whole_pixels, CanvasSize};
use super::matrix::AffineMatrix;
use crate::error::{AugmentError, Result};

/// A matrix together with the canvas it should be rendered onto.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WarpGeometry {
    pub matrix: AffineMatrix,
    pub canvas: CanvasSize,
}

/// Build the geometry for a rotation about the raster centre.
///
/// With `pad_canvas` the canvas grows (or shrinks, for strongly elongated
/// rasters) to the bounding box of the rotated rectangle and the translation
/// is shifted by half the extent delta, so the source centre lands on the
/// canvas centre. Without it the canvas keeps the input extent and corners
/// may clip.
///
/// # Arguments
///
/// * `width` - Source width in pixels
/// * `height` - Source height in pixels
/// * `angle_degrees` - Rotation angle (positive = counter-clockwise)
/// * `pad_canvas` - Whether to resize the canvas to fit the rotated content
pub fn rotation_geometry(
    width: u32,
    height: u32,
    angle_degrees: f64,
    pad_canvas: bool,
) -> WarpGeometry {
    let center = ((width as f64 - 1.0) / 2.0, (height as f64 - 1.0) / 2.0);
    let matrix = AffineMatrix::rotation(center, angle_degrees, 1.0);

    if !pad_canvas {
        return WarpGeometry {
            matrix,
            canvas: CanvasSize::new(width, height),
        };
    }

    let canvas = rotated_canvas(width, height, angle_degrees);
    let dx = (canvas.width as f64 - width as f64) / 2.0;
    let dy = (canvas.height as f64 - height as f64) / 2.0;
    trace!(
        "rotation by {angle_degrees:.3} deg: {width}x{height} -> {}x{}",
        canvas.width,
        canvas.height
    );

    WarpGeometry {
        matrix: matrix.translated(dx, dy),
        canvas,
    }
}

/// Build the geometry for a fractional control-point displacement.
///
/// Three control points are placed around the raster centre at a distance
/// of one third of the shorter side (`s`):
///
/// ```text
/// p0 = (cx + s, cy + s)
/// p1 = (cx + s, cy - s)
/// p2 = (cx - s, cy - s)
/// ```
///
/// Each destination is `p_i + s * (d[2i], d[2i + 1])`. The matrix maps the
/// source points onto the destinations, and the canvas grows to three times
/// the largest per-axis distance of a destination point from the centre
/// (never below the input extent's third), so large displacements stay in
/// frame. Displacements are not clamped.
///
/// # Errors
///
/// [`AugmentError::InvalidParameter`] if a displacement is not finite or the
/// destination points are degenerate enough to make the solve fail.
pub fn affine_geometry(width: u32, height: u32, displacement: &[f64; 6]) -> Result<WarpGeometry> {
    if displacement.iter().any(|d| !d.is_finite()) {
        return Err(AugmentError::InvalidParameter(format!(
            "affine displacement must be finite, got {displacement:?}"
        )));
    }

    let square = ((width.min(height) / 3) as f64).max(1.0);
    let cx = (width / 2) as f64;
    let cy = (height / 2) as f64;

    let src = [
        (cx + square, cy + square),
        (cx + square, cy - square),
        (cx - square, cy - square),
    ];
    let dst: [(f64, f64); 3] = std::array::from_fn(|i| {
        (
            src[i].0 + square * displacement[2 * i],
            src[i].1 + square * displacement[2 * i + 1],
        )
    });

    let matrix = AffineMatrix::from_point_pairs(src, dst)?;

    let reach_x = dst
        .iter()
        .map(|p| (p.0 - cx).abs())
        .fold(width as f64 / 3.0, f64::max);
    let reach_y = dst
        .iter()
        .map(|p| (p.1 - cy).abs())
        .fold(height as f64 / 3.0, f64::max);
    let canvas = CanvasSize::new(whole_pixels(3.0 * reach_x), whole_pixels(3.0 * reach_y));
    trace!(
        "affine {displacement:?}: {width}x{height} -> {}x{}",
        canvas.width,
        canvas.height
    );

    Ok(WarpGeometry { matrix, canvas })
}
