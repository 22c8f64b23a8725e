//! Raster resampling: applying a matrix to an image or mask buffer.
//!
//! This module provides the backward warp used for every raster target,
//! with a choice of interpolation kernel and border policy:
//! - **Nearest**: keeps discrete labels intact, the default for masks
//! - **Linear**: smooth and cheap, the default for images
//! - **Cubic** / **Lanczos**: sharper results at a higher cost
//!
//! The caller always picks the kernel; nothing here depends on whether the
//! raster is an image or a mask.

mod border;
mod interpolation;
mod resample;

pub use border::{BorderMode, BorderValue};
pub use interpolation::Interpolation;
pub use resample::resample;
