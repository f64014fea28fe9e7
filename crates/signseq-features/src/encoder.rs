//! Frame Encoder - One frame to one feature row
//!
//! Missing groups and missing trailing landmarks become zeros. Landmarks past
//! a group's cardinality are dropped. A landmark that is present but lacks a
//! coordinate is an error: only whole landmarks are ever defaulted.

use ndarray::{Array1, ArrayViewMut1};
use signseq_core::{FeatureLayout, Frame, SignSeqError, SignSeqResult, STANDARD_LAYOUT};
use tracing::trace;

/// Encodes frames against a fixed layout
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameEncoder {
    layout: FeatureLayout,
}

impl FrameEncoder {
    pub fn new(layout: FeatureLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &FeatureLayout {
        &self.layout
    }

    /// Row width produced by this encoder
    pub fn width(&self) -> usize {
        self.layout.width()
    }

    /// Encode a frame into a fresh row
    pub fn encode(&self, frame: &Frame) -> SignSeqResult<Array1<f32>> {
        let mut row = Array1::zeros(self.width());
        self.encode_into(frame, row.view_mut())?;
        Ok(row)
    }

    /// Encode a frame into `out`, overwriting every column
    pub fn encode_into(&self, frame: &Frame, mut out: ArrayViewMut1<'_, f32>) -> SignSeqResult<()> {
        if out.len() != self.width() {
            return Err(SignSeqError::shape((1, self.width()), (1, out.len())));
        }
        out.fill(0.0);

        for block in self.layout.groups() {
            let landmarks = frame.group(block.group);

            if landmarks.len() > block.cardinality {
                trace!(
                    group = %block.group,
                    received = landmarks.len(),
                    kept = block.cardinality,
                    "truncating landmark group"
                );
            } else if landmarks.len() < block.cardinality {
                trace!(
                    group = %block.group,
                    received = landmarks.len(),
                    "zero-filling missing landmarks"
                );
            }

            for (index, raw) in landmarks.iter().take(block.cardinality).enumerate() {
                let landmark = raw.validate(block.group, index)?;

                let mut values = [0.0f32; 4];
                landmark.write_to(&mut values[..block.values_per_landmark]);
                for (col, value) in block.landmark_columns(index).zip(values) {
                    out[col] = value;
                }
            }
        }

        Ok(())
    }
}

/// Encode a frame with the standard 226-column layout
pub fn encode_frame(frame: &Frame) -> SignSeqResult<Array1<f32>> {
    FrameEncoder::new(STANDARD_LAYOUT).encode(frame)
}
