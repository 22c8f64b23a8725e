//! Stochastic transforms and their composition.
//!
//! A [`Transform`] samples its parameters once per invocation and the
//! dispatcher applies the resulting geometry to every target in a
//! [`TargetBundle`]:
//!
//! 1. Validate the bundle (mask extent must match the image)
//! 2. Roll the probability gate; on failure return the bundle unchanged
//! 3. Sample [`TransformParams`] and build one matrix + canvas
//! 4. Resample image and mask, map boxes and keypoints
//!
//! Transforms are immutable and reusable; randomness always comes from the
//! caller's RNG, so seeded runs are reproducible.

mod affine;
mod dispatch;
mod pipeline;
mod rotate;

pub use affine::{Affine, AffineConfig};
pub use pipeline::{Pipeline, TransformConfig};
pub use rotate::{AngleLimit, Rotate, RotateConfig};

use log::{debug, trace};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::error::{AugmentError, Result};
use crate::params::TransformParams;
use crate::raster::Element;
use crate::targets::TargetBundle;
use crate::warp::{BorderMode, BorderValue, Interpolation};

/// Default probability of applying a transform.
pub const DEFAULT_PROBABILITY: f64 = 0.5;

/// Probability gate deciding whether a transform runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gate {
    /// Probability in `[0, 1]`.
    pub p: f64,
    /// Bypass the probability roll entirely.
    pub always_apply: bool,
}

impl Default for Gate {
    fn default() -> Self {
        Self {
            p: DEFAULT_PROBABILITY,
            always_apply: false,
        }
    }
}

impl Gate {
    /// # Errors
    ///
    /// [`AugmentError::InvalidParameter`] if `p` is outside `[0, 1]`.
    pub fn new(p: f64, always_apply: bool) -> Result<Self> {
        if !(0.0..=1.0).contains(&p) {
            return Err(AugmentError::InvalidParameter(format!(
                "probability must be in [0, 1], got {p}"
            )));
        }
        Ok(Self { p, always_apply })
    }

    /// A gate that always passes.
    pub fn always() -> Self {
        Self {
            p: 1.0,
            always_apply: true,
        }
    }

    /// Roll the gate.
    pub fn passes(&self, rng: &mut dyn RngCore) -> bool {
        self.always_apply || rng.random::<f64>() < self.p
    }
}

/// Resampling options shared by the raster targets of one transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarpOptions {
    /// Kernel for the image.
    pub interpolation: Interpolation,
    /// Kernel for the mask.
    pub mask_interpolation: Interpolation,
    /// Border policy for both rasters.
    pub border_mode: BorderMode,
    /// Image fill for [`BorderMode::Constant`].
    pub border_value: BorderValue,
    /// Mask fill for [`BorderMode::Constant`].
    pub mask_value: BorderValue,
}

impl Default for WarpOptions {
    fn default() -> Self {
        Self {
            interpolation: Interpolation::Linear,
            mask_interpolation: Interpolation::Nearest,
            border_mode: BorderMode::Reflect,
            border_value: BorderValue::default(),
            mask_value: BorderValue::default(),
        }
    }
}

/// Outcome of one transform invocation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Invocation {
    /// The gate failed; targets were returned unchanged.
    Skipped,
    /// Parameters were sampled and applied to every target.
    Applied(TransformParams),
}

/// A geometric transform that can be applied to a [`TargetBundle`].
///
/// Implementors describe *what* to sample; [`TransformExt`] provides the
/// shared gate-sample-dispatch logic for every implementor, including
/// `dyn Transform`.
pub trait Transform: Send + Sync + std::fmt::Debug {
    /// Name of this transform for logging/debugging.
    fn name(&self) -> &str;

    /// Probability gate.
    fn gate(&self) -> Gate;

    /// Interpolation and border settings.
    fn warp_options(&self) -> &WarpOptions;

    /// Draw the parameters for one invocation.
    fn sample_params(&self, rng: &mut dyn RngCore) -> TransformParams;
}

/// Application methods available on every [`Transform`].
pub trait TransformExt: Transform {
    /// Apply the transform to every target in `bundle`.
    ///
    /// # Errors
    ///
    /// [`AugmentError::DimensionMismatch`] if the mask and image extents
    /// differ. Validation happens before the gate and before any buffer is
    /// read, so a failing call has no effect.
    fn apply<T: Element, M: Element>(
        &self,
        bundle: &TargetBundle<T, M>,
        rng: &mut dyn RngCore,
    ) -> Result<TargetBundle<T, M>> {
        self.apply_with_record(bundle, rng).map(|(out, _)| out)
    }

    /// Like [`TransformExt::apply`], also reporting what happened.
    fn apply_with_record<T: Element, M: Element>(
        &self,
        bundle: &TargetBundle<T, M>,
        rng: &mut dyn RngCore,
    ) -> Result<(TargetBundle<T, M>, Invocation)> {
        bundle.validate()?;

        if !self.gate().passes(rng) {
            trace!("{}: gate closed, targets unchanged", self.name());
            return Ok((bundle.clone(), Invocation::Skipped));
        }

        let params = self.sample_params(rng);
        debug!(
            "{}: applying {:?} to {:?}",
            self.name(),
            params,
            bundle.present_targets()
        );
        let out = dispatch::warp_bundle(bundle, &params, self.warp_options())?;
        Ok((out, Invocation::Applied(params)))
    }

    /// Apply known parameters, bypassing the gate and the RNG.
    fn apply_params<T: Element, M: Element>(
        &self,
        bundle: &TargetBundle<T, M>,
        params: &TransformParams,
    ) -> Result<TargetBundle<T, M>> {
        bundle.validate()?;
        dispatch::warp_bundle(bundle, params, self.warp_options())
    }
}

impl<X: Transform + ?Sized> TransformExt for X {}
