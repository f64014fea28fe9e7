//! Sample Pipeline - One raw capture to one training sample
//!
//! ```text
//! frames ──normalize──► (60, 226) ──jitter?──scale?──time warp?──mirror?──► sample
//! ```
//!
//! Each transform is gated by its own probability and the order is fixed.

use rand::Rng;
use signseq_core::{Frame, NormalizedSequence, SignSeqResult};
use signseq_features::SequenceNormalizer;
use tracing::trace;

use crate::{jitter, mirror_sequence, random_scale, random_time_warp_resample, AugmentationConfig};

/// Which transforms fired for a sample
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppliedAugmentations {
    pub jitter: bool,
    pub scale: bool,
    pub time_warp: bool,
    pub mirror: bool,
}

impl AppliedAugmentations {
    pub fn any(&self) -> bool {
        self.jitter || self.scale || self.time_warp || self.mirror
    }
}

/// Normalizer plus a validated augmentation config
#[derive(Debug, Clone)]
pub struct SamplePipeline {
    normalizer: SequenceNormalizer,
    config: AugmentationConfig,
}

impl SamplePipeline {
    /// Create a pipeline; the config is validated up front
    pub fn new(config: AugmentationConfig) -> SignSeqResult<Self> {
        config.validate()?;
        Ok(Self {
            normalizer: SequenceNormalizer::new(),
            config,
        })
    }

    pub fn config(&self) -> &AugmentationConfig {
        &self.config
    }

    /// Normalize `frames` and apply the configured augmentations
    pub fn build_sample<R: Rng + ?Sized>(
        &self,
        frames: &[Frame],
        rng: &mut R,
    ) -> SignSeqResult<NormalizedSequence> {
        self.build_sample_traced(frames, rng).map(|(seq, _)| seq)
    }

    /// [`build_sample`](Self::build_sample), also reporting which transforms fired
    pub fn build_sample_traced<R: Rng + ?Sized>(
        &self,
        frames: &[Frame],
        rng: &mut R,
    ) -> SignSeqResult<(NormalizedSequence, AppliedAugmentations)> {
        let normalized = self.normalizer.normalize(frames)?;
        self.augment(normalized, rng)
    }

    /// Apply the configured augmentations to an already-normalized sequence.
    ///
    /// With augmentation disabled the sequence is returned unchanged and
    /// `rng` is not touched.
    pub fn augment<R: Rng + ?Sized>(
        &self,
        mut seq: NormalizedSequence,
        rng: &mut R,
    ) -> SignSeqResult<(NormalizedSequence, AppliedAugmentations)> {
        let mut applied = AppliedAugmentations::default();
        if !self.config.enabled {
            return Ok((seq, applied));
        }

        if gate(rng, self.config.jitter_prob) {
            seq = jitter(&seq, self.config.jitter_sigma, rng)?;
            applied.jitter = true;
        }
        if gate(rng, self.config.scale_prob) {
            seq = random_scale(&seq, self.config.scale_range, rng)?;
            applied.scale = true;
        }
        if gate(rng, self.config.time_warp_prob) {
            seq = random_time_warp_resample(&seq, self.config.time_warp_range, rng)?;
            applied.time_warp = true;
        }
        if gate(rng, self.config.mirror_prob) {
            seq = mirror_sequence(&seq)?;
            applied.mirror = true;
        }

        trace!(
            jitter = applied.jitter,
            scale = applied.scale,
            time_warp = applied.time_warp,
            mirror = applied.mirror,
            "augmented sample"
        );

        Ok((seq, applied))
    }
}

fn gate<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> bool {
    rng.gen::<f64>() < probability
}

/// Build one sample with a one-off pipeline
pub fn build_sample<R: Rng + ?Sized>(
    frames: &[Frame],
    config: &AugmentationConfig,
    rng: &mut R,
) -> SignSeqResult<NormalizedSequence> {
    SamplePipeline::new(config.clone())?.build_sample(frames, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use signseq_core::{LandmarkGroup, RawLandmark, SignSeqError, SEQUENCE_SHAPE};
    use signseq_features::normalize_sequence;

    fn frames(n: usize) -> Vec<Frame> {
        (0..n)
            .map(|t| {
                let x = 0.3 + t as f32 * 0.005;
                Frame::new(t as f64 * 33.0)
                    .with_group(
                        LandmarkGroup::Pose,
                        vec![RawLandmark::with_visibility(0.5, 0.5, 0.0, 0.9); 25],
                    )
                    .with_group(LandmarkGroup::LeftHand, vec![RawLandmark::new(x, 0.6, 0.1); 21])
            })
            .collect()
    }

    #[test]
    fn test_disabled_returns_normalized() {
        let raw = frames(90);
        let mut rng = StdRng::seed_from_u64(0);
        let sample = build_sample(&raw, &AugmentationConfig::disabled(), &mut rng).unwrap();

        assert_eq!(sample, normalize_sequence(&raw).unwrap());
    }

    #[test]
    fn test_zero_probabilities_apply_nothing() {
        let config = AugmentationConfig {
            jitter_prob: 0.0,
            scale_prob: 0.0,
            time_warp_prob: 0.0,
            mirror_prob: 0.0,
            ..Default::default()
        };
        let pipeline = SamplePipeline::new(config).unwrap();
        let raw = frames(40);

        let (sample, applied) = pipeline
            .build_sample_traced(&raw, &mut StdRng::seed_from_u64(1))
            .unwrap();
        assert!(!applied.any());
        assert_eq!(sample, normalize_sequence(&raw).unwrap());
    }

    #[test]
    fn test_always_applies_everything() {
        let pipeline = SamplePipeline::new(AugmentationConfig::always()).unwrap();
        let (sample, applied) = pipeline
            .build_sample_traced(&frames(40), &mut StdRng::seed_from_u64(2))
            .unwrap();

        assert_eq!(
            applied,
            AppliedAugmentations {
                jitter: true,
                scale: true,
                time_warp: true,
                mirror: true,
            }
        );
        assert_eq!(sample.shape(), SEQUENCE_SHAPE);
    }

    #[test]
    fn test_mirror_only_moves_hand_block() {
        let config = AugmentationConfig {
            jitter_prob: 0.0,
            scale_prob: 0.0,
            time_warp_prob: 0.0,
            mirror_prob: 1.0,
            ..Default::default()
        };
        let raw = frames(20);
        let sample = build_sample(&raw, &config, &mut StdRng::seed_from_u64(3)).unwrap();
        let normalized = normalize_sequence(&raw).unwrap();

        // left hand data now sits in the right hand block with x negated
        assert_eq!(sample.row(10)[163], -normalized.row(10)[100]);
        assert_eq!(sample.row(10)[164], normalized.row(10)[101]);
        assert_eq!(sample.row(10)[100], 0.0);
    }

    #[test]
    fn test_same_seed_same_sample() {
        let pipeline = SamplePipeline::new(AugmentationConfig::production()).unwrap();
        let raw = frames(75);

        let a = pipeline.build_sample(&raw, &mut StdRng::seed_from_u64(11)).unwrap();
        let b = pipeline.build_sample(&raw, &mut StdRng::seed_from_u64(11)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_production_rates() {
        let pipeline = SamplePipeline::new(AugmentationConfig::production()).unwrap();
        let seq = normalize_sequence(&frames(30)).unwrap();
        let mut rng = StdRng::seed_from_u64(99);

        let trials = 4000;
        let mut counts = [0usize; 4];
        for _ in 0..trials {
            let (_, applied) = pipeline.augment(seq.clone(), &mut rng).unwrap();
            counts[0] += applied.jitter as usize;
            counts[1] += applied.scale as usize;
            counts[2] += applied.time_warp as usize;
            counts[3] += applied.mirror as usize;
        }

        let rate = |c: usize| c as f64 / trials as f64;
        assert!((rate(counts[0]) - 0.5).abs() < 0.05);
        assert!((rate(counts[1]) - 0.3).abs() < 0.05);
        assert!((rate(counts[2]) - 0.3).abs() < 0.05);
        assert!((rate(counts[3]) - 0.5).abs() < 0.05);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = AugmentationConfig {
            scale_prob: -0.1,
            ..Default::default()
        };
        assert!(matches!(
            SamplePipeline::new(config),
            Err(SignSeqError::Config(_))
        ));
    }

    #[test]
    fn test_empty_capture_propagates() {
        let pipeline = SamplePipeline::new(AugmentationConfig::default()).unwrap();
        let err = pipeline
            .build_sample(&[], &mut StdRng::seed_from_u64(0))
            .unwrap_err();
        assert!(matches!(err, SignSeqError::EmptyInput));
    }
}
