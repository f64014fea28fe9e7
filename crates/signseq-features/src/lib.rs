//! SignSeq Features - From raw frames to a fixed `(60, 226)` matrix
//!
//! ```text
//! [Frame; N] ──encode──► (N, 226) ──resample time──► (60, 226)
//! ```
//!
//! Encoding is per frame and only looks at the groups in the feature
//! layout. Resampling is piecewise linear over a uniform time base and is
//! shared with the time-warp augmentations.

pub mod encoder;
pub mod resample;
pub mod normalizer;

pub use encoder::*;
pub use resample::*;
pub use normalizer::*;
