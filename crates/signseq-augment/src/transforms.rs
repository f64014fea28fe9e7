//! Augmentation Suite
//!
//! | transform                | shape         | randomness               |
//! |--------------------------|---------------|--------------------------|
//! | [`jitter`]               | `(60, 226)`   | Gaussian noise           |
//! | [`scale`]                | `(60, 226)`   | none (see [`random_scale`]) |
//! | [`time_warp_resample`]   | `(60, 226)`   | none (see [`random_time_warp_resample`]) |
//! | [`time_warp`]            | `(round(60 * f), 226)` | none            |
//! | [`mirror_sequence`]      | `(60, 226)`   | none                     |
//!
//! Each returns a new matrix; inputs are never modified.

use ndarray::{s, Array2, ArrayView2};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use signseq_core::{
    ConfigError, FeatureLayout, LandmarkGroup, NormalizedSequence, SignSeqError, SignSeqResult,
    SEQUENCE_LENGTH, STANDARD_LAYOUT,
};
use signseq_features::resample_time;

use crate::{FactorRange, MAX_TIME_WARP_FACTOR};

fn check_factor(name: &'static str, value: f32, max: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 && value <= max {
        Ok(())
    } else {
        Err(ConfigError::InvalidFactor { name, value, max })
    }
}

/// Add zero-mean Gaussian noise with standard deviation `sigma` to every
/// entry. `sigma == 0` returns an exact copy.
pub fn jitter<R: Rng + ?Sized>(
    seq: &NormalizedSequence,
    sigma: f32,
    rng: &mut R,
) -> SignSeqResult<NormalizedSequence> {
    if sigma == 0.0 {
        return Ok(seq.clone());
    }
    if !sigma.is_finite() || sigma < 0.0 {
        return Err(ConfigError::InvalidSigma(sigma).into());
    }
    let noise = Normal::new(0.0f32, sigma).map_err(|_| ConfigError::InvalidSigma(sigma))?;

    Ok(seq.map(|v| v + noise.sample(&mut *rng)))
}

/// Multiply every entry by `factor`, which must be finite and positive
pub fn scale(seq: &NormalizedSequence, factor: f32) -> SignSeqResult<NormalizedSequence> {
    check_factor("scale", factor, f32::MAX)?;
    if factor == 1.0 {
        return Ok(seq.clone());
    }
    Ok(seq.map(|v| v * factor))
}

/// [`scale`] with a factor drawn uniformly from `range`
pub fn random_scale<R: Rng + ?Sized>(
    seq: &NormalizedSequence,
    range: FactorRange,
    rng: &mut R,
) -> SignSeqResult<NormalizedSequence> {
    scale(seq, range.sample(rng))
}

/// Frame count after warping `len` frames by `factor`, at least 1
pub fn warped_len(len: usize, factor: f32) -> usize {
    let target = (len as f64 * f64::from(factor)).round();
    if target.is_nan() || target < 1.0 {
        1
    } else {
        target as usize
    }
}

/// Resample `matrix` from `T` to `round(T * factor)` rows.
///
/// The result length differs from the input; do not use this where a
/// fixed `(60, 226)` sample is required. `factor` must lie in
/// `(0, MAX_TIME_WARP_FACTOR]`.
pub fn time_warp(matrix: ArrayView2<'_, f32>, factor: f32) -> SignSeqResult<Array2<f32>> {
    check_factor("time_warp", factor, MAX_TIME_WARP_FACTOR)?;
    Ok(resample_time(matrix, warped_len(matrix.nrows(), factor)))
}

/// Simulate a local speed change while keeping all 60 frames: warp to
/// `round(60 * factor)` frames, then resample back to 60.
///
/// `factor == 1.0` returns an exact copy.
pub fn time_warp_resample(
    seq: &NormalizedSequence,
    factor: f32,
) -> SignSeqResult<NormalizedSequence> {
    check_factor("time_warp", factor, MAX_TIME_WARP_FACTOR)?;
    if factor == 1.0 {
        return Ok(seq.clone());
    }
    let warped = time_warp(seq.view(), factor)?;
    NormalizedSequence::from_array(resample_time(warped.view(), SEQUENCE_LENGTH))
}

/// [`time_warp_resample`] with a factor drawn uniformly from `range`
pub fn random_time_warp_resample<R: Rng + ?Sized>(
    seq: &NormalizedSequence,
    range: FactorRange,
    rng: &mut R,
) -> SignSeqResult<NormalizedSequence> {
    time_warp_resample(seq, range.sample(rng))
}

/// Mirror a gesture left to right under `layout`.
///
/// Negates every x column of every block, then swaps the left- and
/// right-hand blocks. Columns come from the layout, so the hand blocks must
/// have the same width.
pub fn mirror_with_layout(
    matrix: ArrayView2<'_, f32>,
    layout: &FeatureLayout,
) -> SignSeqResult<Array2<f32>> {
    let (rows, cols) = matrix.dim();
    if cols != layout.width() {
        return Err(SignSeqError::shape((rows, layout.width()), (rows, cols)));
    }

    let left = layout.group(LandmarkGroup::LeftHand).columns();
    let right = layout.group(LandmarkGroup::RightHand).columns();
    if left.len() != right.len() {
        return Err(SignSeqError::shape((rows, left.len()), (rows, right.len())));
    }

    let mut out = matrix.to_owned();
    for col in layout.x_columns() {
        out.column_mut(col).mapv_inplace(|v| -v);
    }

    let left_block = out.slice(s![.., left.clone()]).to_owned();
    let right_block = out.slice(s![.., right.clone()]).to_owned();
    out.slice_mut(s![.., left]).assign(&right_block);
    out.slice_mut(s![.., right]).assign(&left_block);

    Ok(out)
}

/// Left/right mirror of a normalized sequence. Applying it twice gives the
/// original back.
pub fn mirror_sequence(seq: &NormalizedSequence) -> SignSeqResult<NormalizedSequence> {
    NormalizedSequence::from_array(mirror_with_layout(seq.view(), &STANDARD_LAYOUT)?)
}
