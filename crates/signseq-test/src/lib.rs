//! SignSeq Test Harness - Synthetic captures and pipeline validation
//!
//! This crate provides:
//! - Deterministic synthetic captures shaped like extractor output
//! - End-to-end scenarios over normalization, augmentation and batching
//! - Opt-in log output for tests

pub mod synthetic;
pub mod scenarios;
pub mod logging;

pub use synthetic::*;
pub use scenarios::*;
pub use logging::*;
