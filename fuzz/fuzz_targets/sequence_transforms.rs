//! Transforms keep the output shape for any factor and any input values.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use ndarray::Array2;
use signseq_augment::{jitter, mirror_sequence, scale, time_warp_resample};
use signseq_core::{NormalizedSequence, SEQUENCE_SHAPE};

#[derive(Arbitrary, Debug)]
struct TransformInput {
    fill: Vec<f32>,
    factor: f32,
    sigma: f32,
    seed: u64,
}

fuzz_target!(|input: TransformInput| {
    use rand::SeedableRng;

    let (rows, cols) = SEQUENCE_SHAPE;
    let values: Vec<f32> = (0..rows * cols)
        .map(|i| input.fill.get(i % input.fill.len().max(1)).copied().unwrap_or(0.0))
        .collect();
    let Ok(matrix) = Array2::from_shape_vec(SEQUENCE_SHAPE, values) else {
        return;
    };
    let Ok(seq) = NormalizedSequence::from_array(matrix) else {
        return;
    };

    if let Ok(scaled) = scale(&seq, input.factor) {
        assert_eq!(scaled.shape(), SEQUENCE_SHAPE);
    }
    if let Ok(warped) = time_warp_resample(&seq, input.factor) {
        assert_eq!(warped.shape(), SEQUENCE_SHAPE);
    }
    let mut rng = rand::rngs::StdRng::seed_from_u64(input.seed);
    if let Ok(noisy) = jitter(&seq, input.sigma, &mut rng) {
        assert_eq!(noisy.shape(), SEQUENCE_SHAPE);
    }
    if let Ok(mirrored) = mirror_sequence(&seq) {
        assert_eq!(mirrored.shape(), SEQUENCE_SHAPE);
    }
});
