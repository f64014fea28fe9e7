//! End-to-end pipeline scenarios
//!
//! The harness mimics a training data loader: captures are partitioned over
//! worker threads, each worker owns a random source derived from the run
//! seed, and every emitted sample is checked against the output contract
//! before it joins the batch.

use std::thread;

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use signseq_augment::{
    mirror_sequence, time_warp_resample, worker_rng, AugmentationConfig, SamplePipeline,
};
use signseq_core::{
    Capture, Frame, LandmarkGroup, NormalizedSequence, RawLandmark, SignSeqError, SignSeqResult,
    FEATURE_DIM, SEQUENCE_LENGTH, SEQUENCE_SHAPE,
};
use signseq_dataset::{DatasetMeta, Sample, SampleBatch};
use signseq_features::normalize_sequence;
use tracing::{debug, warn};

use crate::{constant_capture, SyntheticCaptures, SyntheticConfig};

/// Harness configuration
#[derive(Clone, Debug)]
pub struct PipelineHarnessConfig {
    /// Distinct recording users
    pub users: usize,
    /// Gesture classes
    pub classes: usize,
    /// Captures per (user, class)
    pub repeats: usize,
    /// Data loading workers
    pub workers: usize,
    /// Empty captures mixed into the input
    pub empty_captures: usize,
    pub synthetic: SyntheticConfig,
    pub augmentation: AugmentationConfig,
    /// Run seed
    pub seed: u64,
}

impl Default for PipelineHarnessConfig {
    fn default() -> Self {
        PipelineHarnessConfig {
            users: 3,
            classes: 4,
            repeats: 2,
            workers: 4,
            empty_captures: 1,
            synthetic: SyntheticConfig::default(),
            augmentation: AugmentationConfig::production(),
            seed: 42,
        }
    }
}

impl PipelineHarnessConfig {
    /// Minimal run for quick tests
    pub fn minimal() -> Self {
        PipelineHarnessConfig {
            users: 2,
            classes: 2,
            repeats: 1,
            workers: 2,
            synthetic: SyntheticConfig::clean(),
            ..Default::default()
        }
    }

    /// Standard run
    pub fn standard() -> Self {
        Self::default()
    }

    /// Many noisy captures, every transform always applied
    pub fn stress() -> Self {
        PipelineHarnessConfig {
            users: 6,
            classes: 5,
            repeats: 3,
            workers: 8,
            empty_captures: 4,
            synthetic: SyntheticConfig::noisy(),
            augmentation: AugmentationConfig::always(),
            seed: 7,
        }
    }

    pub fn with_augmentation(mut self, augmentation: AugmentationConfig) -> Self {
        self.augmentation = augmentation;
        self
    }
}

/// Outcome of a harness run
#[derive(Debug, Clone)]
pub struct PipelineRunResult {
    /// Samples that passed every check
    pub batch: SampleBatch,
    /// Captures rejected as empty
    pub skipped_empty: usize,
    /// Captures rejected for any other reason
    pub failed: usize,
    /// Contract violations found in emitted samples
    pub invariant_violations: Vec<String>,
}

impl PipelineRunResult {
    /// No violations and no unexpected failures
    pub fn passed(&self) -> bool {
        self.invariant_violations.is_empty() && self.failed == 0
    }

    pub fn meta(&self) -> DatasetMeta {
        self.batch.meta()
    }
}

/// Drives synthetic captures through the sample pipeline
pub struct PipelineHarness {
    config: PipelineHarnessConfig,
    captures: Vec<(Capture, i32)>,
}

impl PipelineHarness {
    pub fn new(config: PipelineHarnessConfig) -> Self {
        let mut generator = SyntheticCaptures::new(config.synthetic.clone());
        let mut captures = Vec::new();

        for user in 0..config.users {
            for class in 0..config.classes {
                for _ in 0..config.repeats {
                    let capture =
                        generator.capture(&format!("user_{user}"), &format!("class_{class}"));
                    captures.push((capture, class as i32));
                }
            }
        }
        for _ in 0..config.empty_captures {
            captures.push((Capture::new("empty", Vec::new()), 0));
        }

        Self { config, captures }
    }

    pub fn captures(&self) -> &[(Capture, i32)] {
        &self.captures
    }

    /// Run every capture through the pipeline
    pub fn run(&self) -> SignSeqResult<PipelineRunResult> {
        let pipeline = SamplePipeline::new(self.config.augmentation.clone())?;
        let workers = self.config.workers.max(1);
        let chunk = self.captures.len().div_ceil(workers).max(1);

        let outcomes: Vec<WorkerOutcome> = thread::scope(|scope| {
            let handles: Vec<_> = self
                .captures
                .chunks(chunk)
                .enumerate()
                .map(|(worker_id, part)| {
                    let pipeline = &pipeline;
                    let seed = self.config.seed;
                    scope.spawn(move || {
                        let mut rng = worker_rng(seed, worker_id as u64);
                        part.iter()
                            .map(|(capture, label)| {
                                Sample::from_capture(capture, *label, pipeline, &mut rng)
                            })
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            handles.into_iter().map(|h| h.join()).collect()
        });

        let result = tally(outcomes, self.captures.len());

        debug!(
            samples = result.batch.len(),
            skipped = result.skipped_empty,
            failed = result.failed,
            "pipeline harness finished"
        );

        Ok(result)
    }
}

/// What one worker thread handed back, or its panic payload
type WorkerOutcome = thread::Result<Vec<SignSeqResult<Sample>>>;

/// Check every worker's samples and collect the valid ones.
///
/// `expected` is the number of captures fed to the workers.
fn tally(outcomes: Vec<WorkerOutcome>, expected: usize) -> PipelineRunResult {
    let mut result = PipelineRunResult {
        batch: SampleBatch::new(),
        skipped_empty: 0,
        failed: 0,
        invariant_violations: Vec::new(),
    };
    let mut malformed = 0;

    for (worker_id, outcome) in outcomes.into_iter().enumerate() {
        let Ok(samples) = outcome else {
            warn!(worker = worker_id, "pipeline worker panicked");
            result
                .invariant_violations
                .push(format!("worker {worker_id} panicked"));
            continue;
        };

        for sample in samples {
            match sample {
                Ok(sample) => {
                    let index = result.batch.len() + malformed;
                    if sample.sequence.shape() != SEQUENCE_SHAPE {
                        malformed += 1;
                        result
                            .invariant_violations
                            .push(format!("sample {index}: shape {:?}", sample.sequence.shape()));
                    } else if !sample.sequence.is_finite() {
                        malformed += 1;
                        result
                            .invariant_violations
                            .push(format!("sample {index}: non-finite entries"));
                    } else {
                        result.batch.push(sample);
                    }
                }
                Err(SignSeqError::EmptyInput) => result.skipped_empty += 1,
                Err(e) => {
                    warn!(error = %e, "capture rejected");
                    result.failed += 1;
                }
            }
        }
    }

    let accounted = result.batch.len() + malformed + result.failed + result.skipped_empty;
    if accounted != expected {
        result
            .invariant_violations
            .push(format!("lost samples: {accounted} of {expected} accounted for"));
    }
    if !result.meta().is_compatible() {
        result
            .invariant_violations
            .push("dataset metadata does not match sample layout".to_string());
    }

    result
}

/// One pose landmark, hands empty: every normalized row equals the encoded
/// frame.
pub fn test_single_frame_repetition() -> bool {
    let frame = Frame::new(0.0).with_group(
        LandmarkGroup::Pose,
        vec![RawLandmark::with_visibility(0.1, 0.2, 0.0, 1.0)],
    );
    let Ok(seq) = normalize_sequence(&[frame]) else {
        return false;
    };

    let mut expected = vec![0.0f32; FEATURE_DIM];
    expected[..4].copy_from_slice(&[0.1, 0.2, 0.0, 1.0]);

    seq.shape() == SEQUENCE_SHAPE
        && (0..SEQUENCE_LENGTH).all(|t| seq.row(t).iter().eq(expected.iter()))
}

/// 120 identical frames downsample to 60 identical rows.
pub fn test_constant_downsample() -> bool {
    let mut synthetic = SyntheticCaptures::new(SyntheticConfig::clean());
    let frame = synthetic.capture("u", "l").frames.swap_remove(0);
    let capture = constant_capture(&frame, 120);

    let (Ok(seq), Ok(expected)) = (
        normalize_sequence(&capture.frames),
        normalize_sequence(std::slice::from_ref(&frame)),
    ) else {
        return false;
    };
    seq == expected
}

/// An all-zero sequence stays all-zero under a 1.2 time warp.
pub fn test_zero_signal_warp() -> bool {
    let zeros = NormalizedSequence::zeros();
    matches!(time_warp_resample(&zeros, 1.2), Ok(warped) if warped == zeros)
}

/// Face landmarks sent by older captures leave the sequence unchanged.
pub fn test_face_ignored() -> bool {
    let config = SyntheticConfig::legacy_with_face().with_frames(20);
    let with_face = SyntheticCaptures::new(config).capture("u", "l");
    let mut without_face = with_face.clone();
    for frame in &mut without_face.frames {
        frame.landmarks.face.clear();
    }

    match (
        normalize_sequence(&with_face.frames),
        normalize_sequence(&without_face.frames),
    ) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Mirroring a random sequence twice returns it.
pub fn test_mirror_involution(seed: u64) -> bool {
    use rand::Rng;

    let mut rng = StdRng::seed_from_u64(seed);
    let matrix = Array2::from_shape_simple_fn(SEQUENCE_SHAPE, || rng.gen_range(-1.0f32..1.0));
    let Ok(seq) = NormalizedSequence::from_array(matrix) else {
        return false;
    };

    match mirror_sequence(&seq).and_then(|m| mirror_sequence(&m)) {
        Ok(back) => back.approx_eq(&seq, 1e-6),
        Err(_) => false,
    }
}
