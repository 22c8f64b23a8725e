//! Random rotation about the raster centre.

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use super::{Gate, Transform, WarpOptions, DEFAULT_PROBABILITY};
use crate::error::{AugmentError, Result};
use crate::params::TransformParams;

/// Default symmetric angle limit in degrees.
pub const DEFAULT_ANGLE_LIMIT: f64 = 90.0;

/// Range the rotation angle is drawn from, in degrees.
///
/// Deserializes from a bare number (`30` means `[-30, 30]`) or a pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AngleLimit {
    Symmetric(f64),
    Range(f64, f64),
}

impl Default for AngleLimit {
    fn default() -> Self {
        AngleLimit::Symmetric(DEFAULT_ANGLE_LIMIT)
    }
}

impl From<f64> for AngleLimit {
    fn from(limit: f64) -> Self {
        AngleLimit::Symmetric(limit)
    }
}

impl From<(f64, f64)> for AngleLimit {
    fn from((low, high): (f64, f64)) -> Self {
        AngleLimit::Range(low, high)
    }
}

impl AngleLimit {
    /// Inclusive `(low, high)` bounds.
    pub fn bounds(&self) -> (f64, f64) {
        match *self {
            AngleLimit::Symmetric(limit) => (-limit.abs(), limit.abs()),
            AngleLimit::Range(low, high) => (low, high),
        }
    }
}

/// Serializable settings for [`Rotate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotateConfig {
    pub limit: AngleLimit,
    /// Grow the canvas so no source pixel is cropped.
    pub pad_canvas: bool,
    pub warp: WarpOptions,
    pub p: f64,
    pub always_apply: bool,
}

impl Default for RotateConfig {
    fn default() -> Self {
        Self {
            limit: AngleLimit::default(),
            pad_canvas: true,
            warp: WarpOptions::default(),
            p: DEFAULT_PROBABILITY,
            always_apply: false,
        }
    }
}

/// Rotate every target by an angle drawn uniformly from the limit.
///
/// # Example
///
/// ```ignore
/// let rotate = Rotate::from_config(RotateConfig {
///     limit: AngleLimit::Range(-15.0, 15.0),
///     p: 1.0,
///     ..RotateConfig::default()
/// })?;
/// let out = rotate.apply(&bundle, &mut rng)?;
/// ```
#[derive(Debug, Clone)]
pub struct Rotate {
    low: f64,
    high: f64,
    pad_canvas: bool,
    warp: WarpOptions,
    gate: Gate,
}

impl Rotate {
    /// Rotate within `limit` using default options.
    pub fn new(limit: impl Into<AngleLimit>) -> Result<Self> {
        Self::from_config(RotateConfig {
            limit: limit.into(),
            ..RotateConfig::default()
        })
    }

    /// Always rotate by exactly `angle` degrees.
    pub fn fixed(angle: f64, pad_canvas: bool) -> Result<Self> {
        Self::from_config(RotateConfig {
            limit: AngleLimit::Range(angle, angle),
            pad_canvas,
            p: 1.0,
            always_apply: true,
            ..RotateConfig::default()
        })
    }

    /// # Errors
    ///
    /// [`AugmentError::InvalidParameter`] if the bounds are not finite,
    /// `low > high`, or `p` is outside `[0, 1]`.
    pub fn from_config(config: RotateConfig) -> Result<Self> {
        let (low, high) = config.limit.bounds();
        if !low.is_finite() || !high.is_finite() {
            return Err(AugmentError::InvalidParameter(format!(
                "rotation limit must be finite, got ({low}, {high})"
            )));
        }
        if low > high {
            return Err(AugmentError::InvalidParameter(format!(
                "rotation limit low {low} exceeds high {high}"
            )));
        }
        let gate = Gate::new(config.p, config.always_apply)?;

        Ok(Self {
            low,
            high,
            pad_canvas: config.pad_canvas,
            warp: config.warp,
            gate,
        })
    }

    /// Inclusive angle bounds in degrees.
    pub fn bounds(&self) -> (f64, f64) {
        (self.low, self.high)
    }

    pub fn pad_canvas(&self) -> bool {
        self.pad_canvas
    }
}

impl Transform for Rotate {
    fn name(&self) -> &str {
        "rotate"
    }

    fn gate(&self) -> Gate {
        self.gate
    }

    fn warp_options(&self) -> &WarpOptions {
        &self.warp
    }

    fn sample_params(&self, rng: &mut dyn RngCore) -> TransformParams {
        TransformParams::Rotation {
            angle: rng.random_range(self.low..=self.high),
            pad_canvas: self.pad_canvas,
        }
    }
}
