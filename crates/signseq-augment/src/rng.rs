//! Per-worker random sources.
//!
//! There is no process-wide generator. A training run picks one base seed;
//! each data loading worker derives its own [`StdRng`] from it, so workers
//! draw independent streams and a run is reproducible from the base seed.

use rand::rngs::StdRng;
use rand::SeedableRng;

const WORKER_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Seed for worker `worker_id` of a run seeded with `base_seed`
pub fn worker_seed(base_seed: u64, worker_id: u64) -> u64 {
    // splitmix64 finalizer over the offset seed
    let mut z = base_seed.wrapping_add(worker_id.wrapping_add(1).wrapping_mul(WORKER_STRIDE));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Independent, reproducible generator for one worker
pub fn worker_rng(base_seed: u64, worker_id: u64) -> StdRng {
    StdRng::seed_from_u64(worker_seed(base_seed, worker_id))
}
