//! SignSeq Core - Fundamental types for landmark sequences
//!
//! This crate defines the types shared by the whole pipeline:
//! - Feature layout (which landmark groups land in which columns)
//! - Landmark, frame and capture records
//! - The fixed-shape normalized sequence
//! - Error types

pub mod layout;
pub mod landmark;
pub mod frame;
pub mod sequence;
pub mod error;

pub use layout::*;
pub use landmark::*;
pub use frame::*;
pub use sequence::*;
pub use error::*;
