//! Ordered composition of transforms.

use log::debug;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

use super::{Affine, AffineConfig, Invocation, Rotate, RotateConfig, Transform, TransformExt};
use crate::error::{AugmentError, Result};
use crate::raster::Element;
use crate::targets::TargetBundle;

/// Declarative description of one pipeline stage.
///
/// ```json
/// [
///   {"type": "rotate", "limit": 30, "p": 0.8},
///   {"type": "affine", "affine_params": [0.05, 0, 0, 0.05, 0, 0]}
/// ]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransformConfig {
    Rotate(RotateConfig),
    Affine(AffineConfig),
}

impl TransformConfig {
    /// Validate and build the transform.
    pub fn build(&self) -> Result<Box<dyn Transform>> {
        Ok(match self {
            TransformConfig::Rotate(config) => Box::new(Rotate::from_config(config.clone())?),
            TransformConfig::Affine(config) => Box::new(Affine::from_config(config.clone())?),
        })
    }
}

/// Applies transforms in order, each seeing the previous one's output.
///
/// Every stage consumes from the same RNG, so a fixed seed reproduces the
/// whole run.
#[derive(Debug, Default)]
pub struct Pipeline {
    transforms: Vec<Box<dyn Transform>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every stage, failing on the first invalid config.
    pub fn from_configs(configs: &[TransformConfig]) -> Result<Self> {
        let transforms = configs
            .iter()
            .map(TransformConfig::build)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { transforms })
    }

    pub fn push(&mut self, transform: impl Transform + 'static) {
        self.transforms.push(Box::new(transform));
    }

    /// Builder-style [`Pipeline::push`].
    pub fn then(mut self, transform: impl Transform + 'static) -> Self {
        self.push(transform);
        self
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Run every stage on `bundle`.
    ///
    /// # Errors
    ///
    /// The first stage error; the input bundle is never modified.
    pub fn run<T: Element, M: Element>(
        &self,
        bundle: &TargetBundle<T, M>,
        rng: &mut dyn RngCore,
    ) -> Result<TargetBundle<T, M>> {
        self.run_with_replay(bundle, rng).map(|(out, _)| out)
    }

    /// Run with a fresh RNG seeded from `seed`.
    pub fn run_seeded<T: Element, M: Element>(
        &self,
        bundle: &TargetBundle<T, M>,
        seed: u64,
    ) -> Result<TargetBundle<T, M>> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.run(bundle, &mut rng)
    }

    /// Run and record each stage's outcome for [`Pipeline::replay`].
    pub fn run_with_replay<T: Element, M: Element>(
        &self,
        bundle: &TargetBundle<T, M>,
        rng: &mut dyn RngCore,
    ) -> Result<(TargetBundle<T, M>, Vec<Invocation>)> {
        bundle.validate()?;

        let mut current = bundle.clone();
        let mut record = Vec::with_capacity(self.transforms.len());
        for transform in &self.transforms {
            let (next, invocation) = transform.apply_with_record(&current, rng)?;
            current = next;
            record.push(invocation);
        }
        debug!("pipeline of {} stages: {:?}", self.transforms.len(), record);

        Ok((current, record))
    }

    /// Re-apply a recorded run to another bundle without any randomness.
    ///
    /// # Errors
    ///
    /// [`AugmentError::InvalidParameter`] if `record` does not have one entry
    /// per stage.
    pub fn replay<T: Element, M: Element>(
        &self,
        bundle: &TargetBundle<T, M>,
        record: &[Invocation],
    ) -> Result<TargetBundle<T, M>> {
        if record.len() != self.transforms.len() {
            return Err(AugmentError::InvalidParameter(format!(
                "replay record has {} entries for {} stages",
                record.len(),
                self.transforms.len()
            )));
        }
        bundle.validate()?;

        let mut current = bundle.clone();
        for (transform, invocation) in self.transforms.iter().zip(record) {
            if let Invocation::Applied(params) = invocation {
                current = transform.apply_params(&current, params)?;
            }
        }
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::augment::WarpOptions;
    use crate::params::TransformParams;
    use crate::raster::Raster;
    use crate::targets::{BoundingBox, BoxScheme, Keypoint};
    use crate::warp::BorderMode;

    fn bundle() -> TargetBundle {
        let image = Raster::from_fn(32, 24, 3, |x, y, c| ((x * 5 + y * 3 + c * 40) % 256) as u8)
            .unwrap();
        let mask = Raster::from_fn(32, 24, 1, |x, y, _| u8::from(x > 10 && y > 8)).unwrap();
        TargetBundle::new(image)
            .with_mask(mask)
            .with_bboxes(vec![BoundingBox::new(4.0, 4.0, 20.0, 16.0)])
            .with_keypoints(vec![Keypoint::new(12.0, 6.0, 10.0, 1.0)])
    }

    fn mixed() -> Pipeline {
        Pipeline::new()
            .then(Rotate::new(45.0).unwrap())
            .then(Affine::new(&[0.05, 0.0, 0.0, 0.05, -0.05, 0.0]).unwrap())
            .then(Rotate::new((-10.0, 10.0)).unwrap())
    }

    #[test]
    fn test_empty_pipeline_returns_input() {
        let bundle = bundle();
        let out = Pipeline::new().run_seeded(&bundle, 1).unwrap();
        assert_eq!(out, bundle);
    }

    #[test]
    fn test_seeded_runs_are_deterministic() {
        let pipeline = mixed();
        let bundle = bundle();
        for seed in [0, 1, 42, 1234] {
            let a = pipeline.run_seeded(&bundle, seed).unwrap();
            let b = pipeline.run_seeded(&bundle, seed).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let pipeline = Pipeline::new().then(
            Rotate::from_config(RotateConfig {
                p: 1.0,
                ..RotateConfig::default()
            })
            .unwrap(),
        );
        let bundle = bundle();
        let outputs: Vec<_> = (0..4)
            .map(|seed| pipeline.run_seeded(&bundle, seed).unwrap())
            .collect();
        assert!(outputs.windows(2).any(|pair| pair[0] != pair[1]));
    }

    #[test]
    fn test_zero_probability_pipeline_is_noop() {
        let skip = RotateConfig {
            p: 0.0,
            ..RotateConfig::default()
        };
        let pipeline = Pipeline::from_configs(&[
            TransformConfig::Rotate(skip.clone()),
            TransformConfig::Rotate(skip),
        ])
        .unwrap();
        let bundle = bundle();
        let (out, record) = pipeline
            .run_with_replay(&bundle, &mut StdRng::seed_from_u64(8))
            .unwrap();
        assert_eq!(out, bundle);
        assert_eq!(record, vec![Invocation::Skipped, Invocation::Skipped]);
    }

    #[test]
    fn test_replay_matches_original_run() {
        let pipeline = mixed();
        let bundle = bundle();
        let (out, record) = pipeline
            .run_with_replay(&bundle, &mut StdRng::seed_from_u64(77))
            .unwrap();
        assert_eq!(pipeline.replay(&bundle, &record).unwrap(), out);
    }

    #[test]
    fn test_replay_applies_to_paired_bundle() {
        // A second image of the same size receives the same geometry
        let pipeline = Pipeline::new().then(Rotate::fixed(90.0, true).unwrap());
        let first = bundle();
        let (out, record) = pipeline
            .run_with_replay(&first, &mut StdRng::seed_from_u64(0))
            .unwrap();
        let second: TargetBundle = TargetBundle::new(Raster::filled(32, 24, 3, 9).unwrap());
        let replayed = pipeline.replay(&second, &record).unwrap();
        assert_eq!(replayed.image.dimensions(), out.image.dimensions());
        assert_eq!(
            record,
            vec![Invocation::Applied(TransformParams::Rotation {
                angle: 90.0,
                pad_canvas: true
            })]
        );
    }

    #[test]
    fn test_identity_stages_keep_normalized_boxes() {
        let full = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        let edge = BoundingBox::new(0.25, 0.5, 1.0, 1.0);
        let bundle: TargetBundle = TargetBundle::new(Raster::filled(100, 50, 3, 0).unwrap())
            .with_bboxes(vec![full, edge])
            .with_bbox_scheme(BoxScheme::Normalized);
        let zero_affine = Affine::from_config(AffineConfig {
            always_apply: true,
            ..AffineConfig::default()
        })
        .unwrap();
        let pipeline = Pipeline::new()
            .then(Rotate::fixed(0.0, true).unwrap())
            .then(zero_affine)
            .then(Rotate::fixed(0.0, false).unwrap());

        let out = pipeline.run_seeded(&bundle, 5).unwrap();
        assert_eq!(out.bboxes, Some(vec![full, edge]));
    }

    #[test]
    fn test_replay_rejects_wrong_length() {
        let err = mixed().replay(&bundle(), &[Invocation::Skipped]).unwrap_err();
        assert!(matches!(err, AugmentError::InvalidParameter(_)));
    }

    #[test]
    fn test_dimension_mismatch_fails_before_any_stage() {
        let bad: TargetBundle = TargetBundle::new(Raster::filled(32, 24, 3, 0).unwrap())
            .with_mask(Raster::filled(24, 32, 1, 0).unwrap());
        let err = mixed().run_seeded(&bad, 3).unwrap_err();
        assert_eq!(
            err,
            AugmentError::DimensionMismatch {
                image: (32, 24),
                mask: (24, 32)
            }
        );
    }

    #[test]
    fn test_from_configs_rejects_invalid_stage() {
        let configs = [
            TransformConfig::Rotate(RotateConfig::default()),
            TransformConfig::Affine(AffineConfig {
                affine_params: vec![0.0; 4],
                ..AffineConfig::default()
            }),
        ];
        assert!(Pipeline::from_configs(&configs).is_err());
    }

    #[test]
    fn test_configs_from_json() {
        let json = r#"[
            {"type": "rotate", "limit": 30, "p": 0.8, "warp": {"border_mode": "constant"}},
            {"type": "affine", "affine_params": [0.05, 0, 0, 0.05, 0, 0]}
        ]"#;
        let configs: Vec<TransformConfig> = serde_json::from_str(json).unwrap();
        match &configs[0] {
            TransformConfig::Rotate(config) => {
                assert_eq!(config.limit.bounds(), (-30.0, 30.0));
                assert_eq!(config.p, 0.8);
                assert_eq!(config.warp.border_mode, BorderMode::Constant);
            }
            other => panic!("unexpected config {other:?}"),
        }
        assert_eq!(
            configs[1],
            TransformConfig::Affine(AffineConfig {
                affine_params: vec![0.05, 0.0, 0.0, 0.05, 0.0, 0.0],
                warp: WarpOptions::default(),
                ..AffineConfig::default()
            })
        );

        let pipeline = Pipeline::from_configs(&configs).unwrap();
        assert_eq!(pipeline.len(), 2);

        let round_trip: Vec<TransformConfig> =
            serde_json::from_str(&serde_json::to_string(&configs).unwrap()).unwrap();
        assert_eq!(round_trip, configs);
    }

    #[test]
    fn test_record_serializes() {
        let record = vec![
            Invocation::Skipped,
            Invocation::Applied(TransformParams::Affine {
                displacement: [0.0, 0.1, 0.0, 0.0, 0.0, 0.0],
            }),
        ];
        let json = serde_json::to_string(&record).unwrap();
        let back: Vec<Invocation> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
