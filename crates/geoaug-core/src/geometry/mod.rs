//! Matrix construction: turning sampled parameters into a 2x3 affine matrix
//! and an output canvas.
//!
//! Every target in one invocation (image, mask, boxes, keypoints) is mapped
//! through the same [`WarpGeometry`], which is what keeps them co-registered.
//!
//! # Coordinate System
//!
//! - Angles are in degrees, positive = counter-clockwise on screen
//! - Points are `(x, y)` in pixel units, origin at the top-left pixel centre
//! - Matrices map source coordinates to destination coordinates

mod builder;
mod canvas;
mod matrix;

pub use builder::{affine_geometry, rotation_geometry, WarpGeometry};
pub use canvas::{rotated_canvas, CanvasSize};
pub use matrix::AffineMatrix;
