//! GeoAug Core - Geometric augmentation library
//!
//! This crate applies random rotations and affine warps to an image together
//! with everything annotated on it: segmentation masks, bounding boxes and
//! keypoints. One set of parameters is sampled per call and shared by every
//! target, so annotations stay aligned with the pixels they describe.
//!
//! # Layout
//!
//! - [`geometry`] builds the 2x3 matrix and output canvas for each transform
//! - [`warp`] resamples rasters through a matrix (interpolation + borders)
//! - [`targets`] maps boxes and keypoints, and defines [`TargetBundle`]
//! - [`augment`] holds the [`Rotate`] and [`Affine`] transforms and the
//!   [`Pipeline`] that composes them
//!
//! # Example
//!
//! ```ignore
//! use geoaug_core::{Pipeline, Raster, Rotate, TargetBundle};
//!
//! let image = Raster::filled(64, 48, 3, 0u8)?;
//! let bundle: TargetBundle = TargetBundle::new(image);
//! let pipeline = Pipeline::new().then(Rotate::new(30.0)?);
//! let out = pipeline.run_seeded(&bundle, 42)?;
//! ```

pub mod augment;
pub mod error;
pub mod geometry;
pub mod params;
pub mod raster;
pub mod targets;
pub mod warp;

pub use augment::{
    Affine, AffineConfig, AngleLimit, Gate, Invocation, Pipeline, Rotate, RotateConfig,
    Transform, TransformConfig, TransformExt, WarpOptions,
};
pub use error::{AugmentError, Result};
pub use geometry::{AffineMatrix, CanvasSize, WarpGeometry};
pub use params::TransformParams;
pub use raster::{Element, Raster};
pub use targets::{BoundingBox, BoxScheme, Keypoint, TargetBundle, TargetKind};
pub use warp::{resample, BorderMode, BorderValue, Interpolation};
