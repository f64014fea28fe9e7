//! Normalized Sequence - The fixed `(T, D)` matrix handed to training
//!
//! A [`NormalizedSequence`] always holds [`SEQUENCE_LENGTH`] rows of
//! [`FEATURE_DIM`] `f32` columns. The shape is checked once on construction;
//! transforms that build a new sequence go through the same check.

use ndarray::{Array2, ArrayView1, ArrayView2};

use crate::{SignSeqError, SignSeqResult, FEATURE_DIM, SEQUENCE_LENGTH};

/// Shape of every normalized sequence
pub const SEQUENCE_SHAPE: (usize, usize) = (SEQUENCE_LENGTH, FEATURE_DIM);

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSequence(Array2<f32>);

impl NormalizedSequence {
    /// Wrap a matrix, rejecting anything that is not `(60, 226)`
    pub fn from_array(matrix: Array2<f32>) -> SignSeqResult<Self> {
        if matrix.dim() != SEQUENCE_SHAPE {
            return Err(SignSeqError::shape(SEQUENCE_SHAPE, matrix.dim()));
        }
        Ok(Self(matrix))
    }

    /// All-zero sequence
    pub fn zeros() -> Self {
        Self(Array2::zeros(SEQUENCE_SHAPE))
    }

    /// Every row equal to `row`
    pub fn from_row(row: &[f32]) -> SignSeqResult<Self> {
        if row.len() != FEATURE_DIM {
            return Err(SignSeqError::shape((1, FEATURE_DIM), (1, row.len())));
        }
        Ok(Self(Array2::from_shape_fn(SEQUENCE_SHAPE, |(_, c)| row[c])))
    }

    pub fn shape(&self) -> (usize, usize) {
        self.0.dim()
    }

    pub fn view(&self) -> ArrayView2<'_, f32> {
        self.0.view()
    }

    pub fn row(&self, t: usize) -> ArrayView1<'_, f32> {
        self.0.row(t)
    }

    pub fn as_array(&self) -> &Array2<f32> {
        &self.0
    }

    pub fn into_array(self) -> Array2<f32> {
        self.0
    }

    /// Apply `f` to every entry. The shape is unchanged.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: FnMut(f32) -> f32,
    {
        Self(self.0.mapv(f))
    }

    /// Largest absolute element-wise difference to `other`
    pub fn max_abs_diff(&self, other: &NormalizedSequence) -> f32 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f32::max)
    }

    /// Element-wise equality within `tolerance`
    pub fn approx_eq(&self, other: &NormalizedSequence, tolerance: f32) -> bool {
        self.max_abs_diff(other) <= tolerance
    }

    /// True when no entry is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }
}

impl AsRef<Array2<f32>> for NormalizedSequence {
    fn as_ref(&self) -> &Array2<f32> {
        &self.0
    }
}

impl TryFrom<Array2<f32>> for NormalizedSequence {
    type Error = SignSeqError;

    fn try_from(matrix: Array2<f32>) -> SignSeqResult<Self> {
        Self::from_array(matrix)
    }
}
