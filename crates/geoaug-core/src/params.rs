//! Sampled parameters for one transform invocation.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::{affine_geometry, rotation_geometry, WarpGeometry};

/// The scalar(s) drawn for one stochastic application.
///
/// Created once per invocation, shared by every target in the bundle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransformParams {
    /// Rotation about the raster centre, in degrees (counter-clockwise).
    Rotation { angle: f64, pad_canvas: bool },
    /// Fractional control-point displacement `[d0..d5]`.
    Affine { displacement: [f64; 6] },
}

impl TransformParams {
    /// Build the matrix and canvas for a `width` x `height` source.
    pub fn geometry(&self, width: u32, height: u32) -> Result<WarpGeometry> {
        match self {
            TransformParams::Rotation { angle, pad_canvas } => {
                Ok(rotation_geometry(width, height, *angle, *pad_canvas))
            }
            TransformParams::Affine { displacement } => {
                affine_geometry(width, height, displacement)
            }
        }
    }

    /// Rotation angle in degrees, if this is a pure rotation.
    pub fn rotation_angle(&self) -> Option<f64> {
        match self {
            TransformParams::Rotation { angle, .. } => Some(*angle),
            TransformParams::Affine { .. } => None,
        }
    }
}
