//! Sequence Normalizer - Variable-length capture to `(60, 226)`

use ndarray::Array2;
use signseq_core::{
    Capture, FeatureLayout, Frame, NormalizedSequence, SignSeqError, SignSeqResult,
    SEQUENCE_LENGTH, STANDARD_LAYOUT,
};
use tracing::debug;

use crate::{resample_time, FrameEncoder};

/// Encodes frames and resamples them to [`SEQUENCE_LENGTH`] rows
#[derive(Debug, Clone, Copy)]
pub struct SequenceNormalizer {
    encoder: FrameEncoder,
}

impl SequenceNormalizer {
    /// Normalizer over the standard layout
    pub fn new() -> Self {
        Self {
            encoder: FrameEncoder::new(STANDARD_LAYOUT),
        }
    }

    pub fn layout(&self) -> &FeatureLayout {
        self.encoder.layout()
    }

    /// Encode every frame into an `(N, 226)` matrix
    pub fn encode_frames(&self, frames: &[Frame]) -> SignSeqResult<Array2<f32>> {
        let mut matrix = Array2::zeros((frames.len(), self.encoder.width()));
        for (frame, row) in frames.iter().zip(matrix.rows_mut()) {
            self.encoder.encode_into(frame, row)?;
        }
        Ok(matrix)
    }

    /// Encode and resample `frames` to a fixed-shape sequence.
    ///
    /// Fails with [`SignSeqError::EmptyInput`] when there are no frames and
    /// with a validation error when any present landmark is incomplete.
    pub fn normalize(&self, frames: &[Frame]) -> SignSeqResult<NormalizedSequence> {
        if frames.is_empty() {
            return Err(SignSeqError::EmptyInput);
        }

        debug!(
            raw_frames = frames.len(),
            target_frames = SEQUENCE_LENGTH,
            "normalizing landmark sequence"
        );

        let encoded = self.encode_frames(frames)?;
        NormalizedSequence::from_array(resample_time(encoded.view(), SEQUENCE_LENGTH))
    }

    pub fn normalize_capture(&self, capture: &Capture) -> SignSeqResult<NormalizedSequence> {
        self.normalize(&capture.frames)
    }
}

impl Default for SequenceNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize frames with the standard layout
pub fn normalize_sequence(frames: &[Frame]) -> SignSeqResult<NormalizedSequence> {
    SequenceNormalizer::new().normalize(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use signseq_core::{LandmarkGroup, RawLandmark, FEATURE_DIM, SEQUENCE_SHAPE};

    fn moving_frame(t: usize) -> Frame {
        let x = t as f32 * 0.01;
        Frame::new(t as f64 * 33.0)
            .with_group(
                LandmarkGroup::Pose,
                vec![RawLandmark::with_visibility(x, 0.5, 0.0, 0.9); 25],
            )
            .with_group(LandmarkGroup::RightHand, vec![RawLandmark::new(x, 0.6, 0.1); 21])
    }

    #[test]
    fn test_empty_input_rejected() {
        let err = normalize_sequence(&[]).unwrap_err();
        assert!(matches!(err, SignSeqError::EmptyInput));
    }

    #[test]
    fn test_single_frame_repeats() {
        let frame = Frame::new(0.0).with_group(
            LandmarkGroup::Pose,
            vec![RawLandmark::with_visibility(0.1, 0.2, 0.0, 1.0)],
        );

        let seq = normalize_sequence(&[frame]).unwrap();
        assert_eq!(seq.shape(), SEQUENCE_SHAPE);

        let mut expected = vec![0.0f32; FEATURE_DIM];
        expected[..4].copy_from_slice(&[0.1, 0.2, 0.0, 1.0]);
        for t in 0..SEQUENCE_LENGTH {
            assert_eq!(seq.row(t).to_vec(), expected);
        }
    }

    #[test]
    fn test_constant_capture_downsamples_unchanged() {
        let frames: Vec<Frame> = (0..120).map(|_| moving_frame(7)).collect();
        let seq = normalize_sequence(&frames).unwrap();

        let expected = crate::encode_frame(&frames[0]).unwrap();
        for t in 0..SEQUENCE_LENGTH {
            assert_eq!(seq.row(t), expected.view());
        }
    }

    #[test]
    fn test_endpoints_preserved() {
        let frames: Vec<Frame> = (0..45).map(moving_frame).collect();
        let seq = normalize_sequence(&frames).unwrap();

        assert_eq!(seq.row(0)[0], 0.0);
        assert_eq!(seq.row(SEQUENCE_LENGTH - 1)[0], 44.0 * 0.01);
        // hand column follows the same time base as the pose column
        assert_eq!(seq.row(17)[0], seq.row(17)[163]);
    }

    #[test]
    fn test_invalid_landmark_fails_whole_capture() {
        let mut frames: Vec<Frame> = (0..10).map(moving_frame).collect();
        frames[6] = frames[6].clone().with_group(
            LandmarkGroup::LeftHand,
            vec![RawLandmark {
                y: None,
                ..RawLandmark::new(0.0, 0.0, 0.0)
            }],
        );

        assert!(matches!(
            normalize_sequence(&frames),
            Err(SignSeqError::Validation { .. })
        ));
    }

    #[test]
    fn test_normalize_capture() {
        let capture = Capture::new("wave", (0..30).map(moving_frame).collect());
        let seq = SequenceNormalizer::default().normalize_capture(&capture).unwrap();
        assert_eq!(seq.shape(), SEQUENCE_SHAPE);
    }

    proptest! {
        #[test]
        fn prop_any_frame_count_gives_fixed_shape(n in 1usize..300) {
            let frames: Vec<Frame> = (0..n).map(moving_frame).collect();
            let seq = normalize_sequence(&frames).unwrap();
            prop_assert_eq!(seq.shape(), SEQUENCE_SHAPE);
            prop_assert!(seq.is_finite());
        }
    }
}
