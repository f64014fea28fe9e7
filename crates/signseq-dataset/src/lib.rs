//! SignSeq Dataset - What the storage layer receives
//!
//! Samples are kept in memory and stacked into one `(n, 60, 226)` array
//! with a matching label vector and a [`DatasetMeta`] record. Writing them
//! anywhere is the caller's business.

pub mod sample;
pub mod batch;
pub mod split;

pub use sample::*;
pub use batch::*;
pub use split::*;
