//! Backward warping of rasters through an affine matrix.
//!
//! # Algorithm
//!
//! For every destination pixel `(x, y)` the source location is
//! `inverse(matrix) * (x, y, 1)`, which is then interpolated with the chosen
//! kernel. Taps outside the source are resolved through the border mode.

use super::border::{BorderMode, BorderValue};
use super::interpolation::{Interpolation, Sampler};
use crate::error::Result;
use crate::geometry::{AffineMatrix, CanvasSize};
use crate::raster::{Element, Raster};

/// Warp `src` through `matrix` onto a fresh raster of size `canvas`.
///
/// # Arguments
///
/// * `src` - Source raster (any channel count)
/// * `matrix` - Source-to-destination mapping
/// * `canvas` - Output extent
/// * `interpolation` - Kernel used to read the source
/// * `border_mode` - Policy for reads outside the source
/// * `border_value` - Fill value, used only with [`BorderMode::Constant`]
///
/// # Errors
///
/// [`crate::AugmentError::EmptyRaster`] if the canvas has a zero extent.
///
/// # Example
///
/// ```ignore
/// let geometry = rotation_geometry(image.width(), image.height(), 30.0, true);
/// let rotated = resample(
///     &image,
///     &geometry.matrix,
///     geometry.canvas,
///     Interpolation::Linear,
///     BorderMode::Constant,
///     &BorderValue::Scalar(0.0),
/// )?;
/// ```
pub fn resample<T: Element>(
    src: &Raster<T>,
    matrix: &AffineMatrix,
    canvas: CanvasSize,
    interpolation: Interpolation,
    border_mode: BorderMode,
    border_value: &BorderValue,
) -> Result<Raster<T>> {
    let inverse = matrix.inverse();
    let sampler = Sampler::new(src, border_mode, border_value);
    let channels = src.channels() as usize;

    let mut data =
        Vec::with_capacity(canvas.width as usize * canvas.height as usize * channels);
    let mut pixel = vec![0.0f32; channels];

    for y in 0..canvas.height {
        for x in 0..canvas.width {
            let (sx, sy) = inverse.transform_point(x as f64, y as f64);
            sampler.sample(sx, sy, interpolation, &mut pixel);
            data.extend(pixel.iter().map(|&v| T::from_f32(v)));
        }
    }

    Raster::new(canvas.width, canvas.height, src.channels(), data)
}
