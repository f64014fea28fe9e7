//! SignSeq Augment - Label-preserving variants of normalized sequences
//!
//! Transforms never mutate their input and never change the `(60, 226)`
//! shape, except [`time_warp`], which exists for callers that accept a
//! variable-length result.
//!
//! All randomness comes from a caller-owned generator. Give each data
//! loading worker its own, see [`worker_rng`].

pub mod config;
pub mod rng;
pub mod transforms;
pub mod pipeline;

pub use config::*;
pub use rng::*;
pub use transforms::*;
pub use pipeline::*;
