//! Affine warp from a fixed control-point displacement.

use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::{Gate, Transform, WarpOptions, DEFAULT_PROBABILITY};
use crate::error::{AugmentError, Result};
use crate::params::TransformParams;

/// Serializable settings for [`Affine`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AffineConfig {
    /// Six displacement factors `[d0..d5]`, in units of the control square.
    pub affine_params: Vec<f64>,
    pub warp: WarpOptions,
    pub p: f64,
    pub always_apply: bool,
}

impl Default for AffineConfig {
    fn default() -> Self {
        Self {
            affine_params: vec![0.0; 6],
            warp: WarpOptions::default(),
            p: DEFAULT_PROBABILITY,
            always_apply: false,
        }
    }
}

/// Displace three control points by fixed fractions of the control square
/// and warp every target with the resulting affine map.
///
/// Nothing is sampled: when the gate opens the configured displacement is
/// used as is. All zeros is the identity.
#[derive(Debug, Clone)]
pub struct Affine {
    displacement: [f64; 6],
    warp: WarpOptions,
    gate: Gate,
}

impl Affine {
    /// Affine warp with `displacement`, applied with the default probability.
    pub fn new(displacement: &[f64]) -> Result<Self> {
        Self::from_config(AffineConfig {
            affine_params: displacement.to_vec(),
            ..AffineConfig::default()
        })
    }

    /// # Errors
    ///
    /// [`AugmentError::InvalidParameter`] unless `affine_params` holds
    /// exactly six finite values and `p` is in `[0, 1]`.
    pub fn from_config(config: AffineConfig) -> Result<Self> {
        let displacement: [f64; 6] = config.affine_params.as_slice().try_into().map_err(|_| {
            AugmentError::InvalidParameter(format!(
                "affine_params must hold 6 values, got {}",
                config.affine_params.len()
            ))
        })?;
        if displacement.iter().any(|d| !d.is_finite()) {
            return Err(AugmentError::InvalidParameter(format!(
                "affine_params must be finite, got {displacement:?}"
            )));
        }
        let gate = Gate::new(config.p, config.always_apply)?;

        Ok(Self {
            displacement,
            warp: config.warp,
            gate,
        })
    }

    pub fn displacement(&self) -> &[f64; 6] {
        &self.displacement
    }
}

impl Transform for Affine {
    fn name(&self) -> &str {
        "affine"
    }

    fn gate(&self) -> Gate {
        self.gate
    }

    fn warp_options(&self) -> &WarpOptions {
        &self.warp
    }

    fn sample_params(&self, _rng: &mut dyn RngCore) -> TransformParams {
        TransformParams::Affine {
            displacement: self.displacement,
        }
    }
}
