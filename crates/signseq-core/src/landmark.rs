//! Landmark records
//!
//! [`RawLandmark`] is what the extractor sends: every field may be missing.
//! [`Landmark`] is the checked form the encoder writes into the feature row.

use serde::{Deserialize, Serialize};

use crate::{LandmarkGroup, LandmarkIssue, SignSeqError, SignSeqResult};

/// Landmark as received, before validation
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLandmark {
    #[serde(default)]
    pub x: Option<f32>,
    #[serde(default)]
    pub y: Option<f32>,
    #[serde(default)]
    pub z: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f32>,
}

impl RawLandmark {
    /// Hand landmark (no visibility)
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            z: Some(z),
            visibility: None,
        }
    }

    /// Pose landmark with a visibility score
    pub fn with_visibility(x: f32, y: f32, z: f32, visibility: f32) -> Self {
        Self {
            visibility: Some(visibility),
            ..Self::new(x, y, z)
        }
    }

    /// Check the landmark against what `group` requires.
    ///
    /// Visibility is required for pose landmarks and dropped for hands.
    pub fn validate(&self, group: LandmarkGroup, index: usize) -> SignSeqResult<Landmark> {
        let field = |value: Option<f32>, name: &'static str| -> SignSeqResult<f32> {
            match value {
                None => Err(SignSeqError::validation(
                    group,
                    index,
                    LandmarkIssue::MissingField(name),
                )),
                Some(v) if !v.is_finite() => Err(SignSeqError::validation(
                    group,
                    index,
                    LandmarkIssue::NonFinite(name),
                )),
                Some(v) => Ok(v),
            }
        };

        let x = field(self.x, "x")?;
        let y = field(self.y, "y")?;
        let z = field(self.z, "z")?;
        let visibility = if group.has_visibility() {
            Some(field(self.visibility, "visibility")?)
        } else {
            None
        };

        Ok(Landmark { x, y, z, visibility })
    }
}

/// Validated landmark (normalized image coordinates)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Detection confidence [0.0 - 1.0], pose only
    pub visibility: Option<f32>,
}

impl Landmark {
    /// Write this landmark's values into `out`: `x, y, z`, then visibility
    /// when `out` has room for it.
    pub fn write_to(&self, out: &mut [f32]) {
        let values = [self.x, self.y, self.z, self.visibility.unwrap_or(0.0)];
        for (slot, value) in out.iter_mut().zip(values) {
            *slot = value;
        }
    }
}
