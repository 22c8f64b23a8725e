//! Error types shared by every geoaug operation.

use thiserror::Error;

/// Errors raised while building transforms or applying them to targets.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AugmentError {
    /// The mask does not cover the same pixel grid as the image.
    #[error(
        "Dimension mismatch: image is {}x{} but mask is {}x{}",
        image.0,
        image.1,
        mask.0,
        mask.1
    )]
    DimensionMismatch {
        /// Image extent as (width, height).
        image: (u32, u32),
        /// Mask extent as (width, height).
        mask: (u32, u32),
    },

    /// A transform parameter is out of range or malformed.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A target field cannot be transformed faithfully and was reset.
    ///
    /// This is reported through the log, never returned from `apply`.
    #[error("Unsupported target: {0}")]
    UnsupportedTarget(String),

    /// Sample buffer length does not match `width * height * channels`.
    #[error("Invalid buffer: expected {expected} samples, got {actual}")]
    BufferSize { expected: usize, actual: usize },

    /// Width, height or channel count is zero.
    #[error("Raster dimensions must be non-zero")]
    EmptyRaster,
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, AugmentError>;
