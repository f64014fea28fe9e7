//! Sample batches and dataset metadata.
//!
//! [`DatasetMeta`] serializes with the key names the exporter writes
//! (`X_dtype`, `y_dtype`), so a stored metadata file reads back unchanged.

use std::collections::BTreeMap;

use ndarray::{s, Array3};
use rand::Rng;
use serde::{Deserialize, Serialize};
use signseq_core::{SignSeqResult, FEATURE_DIM, SEQUENCE_LENGTH};

use crate::{split_by_user, Sample, UserSplit};

/// Element type of the feature array
pub const X_DTYPE: &str = "float32";

/// Element type of the label array
pub const Y_DTYPE: &str = "int32";

/// Shape and dtype record stored next to an exported dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetMeta {
    pub total_samples: usize,
    pub sequence_length: usize,
    pub feature_dim: usize,
    #[serde(rename = "X_dtype")]
    pub x_dtype: String,
    pub y_dtype: String,
}

impl DatasetMeta {
    pub fn new(total_samples: usize) -> Self {
        Self {
            total_samples,
            sequence_length: SEQUENCE_LENGTH,
            feature_dim: FEATURE_DIM,
            x_dtype: X_DTYPE.to_string(),
            y_dtype: Y_DTYPE.to_string(),
        }
    }

    /// Shape of the stacked feature array
    pub fn features_shape(&self) -> (usize, usize, usize) {
        (self.total_samples, self.sequence_length, self.feature_dim)
    }

    /// Whether samples produced by this build fit the recorded layout
    pub fn is_compatible(&self) -> bool {
        self.sequence_length == SEQUENCE_LENGTH
            && self.feature_dim == FEATURE_DIM
            && self.x_dtype == X_DTYPE
            && self.y_dtype == Y_DTYPE
    }

    pub fn to_json(&self) -> SignSeqResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(data: &str) -> SignSeqResult<Self> {
        Ok(serde_json::from_str(data)?)
    }
}

/// In-memory collection of samples, in insertion order
#[derive(Debug, Clone, Default)]
pub struct SampleBatch {
    samples: Vec<Sample>,
}

impl SampleBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn meta(&self) -> DatasetMeta {
        DatasetMeta::new(self.samples.len())
    }

    /// All sequences stacked into `(n, 60, 226)`
    pub fn features(&self) -> Array3<f32> {
        let mut out = Array3::zeros(self.meta().features_shape());
        for (i, sample) in self.samples.iter().enumerate() {
            out.slice_mut(s![i, .., ..]).assign(sample.sequence.as_array());
        }
        out
    }

    pub fn labels(&self) -> Vec<i32> {
        self.samples.iter().map(|s| s.label).collect()
    }

    pub fn users(&self) -> Vec<Option<String>> {
        self.samples.iter().map(|s| s.user.clone()).collect()
    }

    /// Sample count per label
    pub fn class_distribution(&self) -> BTreeMap<i32, usize> {
        let mut counts = BTreeMap::new();
        for sample in &self.samples {
            *counts.entry(sample.label).or_insert(0) += 1;
        }
        counts
    }

    /// Split sample indices so that no user appears on both sides
    pub fn split_by_user<R: Rng + ?Sized>(&self, val_fraction: f64, rng: &mut R) -> UserSplit {
        split_by_user(&self.users(), val_fraction, rng)
    }
}

impl FromIterator<Sample> for SampleBatch {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

impl Extend<Sample> for SampleBatch {
    fn extend<I: IntoIterator<Item = Sample>>(&mut self, iter: I) {
        self.samples.extend(iter);
    }
}
