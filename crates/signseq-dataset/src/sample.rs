//! Labelled training samples

use rand::Rng;
use signseq_augment::SamplePipeline;
use signseq_core::{Capture, NormalizedSequence, SignSeqResult};

/// One `(60, 226)` sequence with its class and recording user
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub sequence: NormalizedSequence,
    /// Zero-based class index
    pub label: i32,
    pub user: Option<String>,
}

impl Sample {
    pub fn new(sequence: NormalizedSequence, label: i32) -> Self {
        Self {
            sequence,
            label,
            user: None,
        }
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Run `capture` through `pipeline` and label the result. The user is
    /// taken from the capture.
    pub fn from_capture<R: Rng + ?Sized>(
        capture: &Capture,
        label: i32,
        pipeline: &SamplePipeline,
        rng: &mut R,
    ) -> SignSeqResult<Self> {
        let sequence = pipeline.build_sample(&capture.frames, rng)?;
        Ok(Self {
            sequence,
            label,
            user: capture.user.clone(),
        })
    }
}
