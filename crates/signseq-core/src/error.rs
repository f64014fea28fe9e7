//! Error types for SignSeq

use std::fmt;

use thiserror::Error;

use crate::LandmarkGroup;

/// What was wrong with a landmark that was present in a group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandmarkIssue {
    /// A required field was absent
    MissingField(&'static str),
    /// A field held NaN or an infinity
    NonFinite(&'static str),
}

impl fmt::Display for LandmarkIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LandmarkIssue::MissingField(field) => write!(f, "missing field `{field}`"),
            LandmarkIssue::NonFinite(field) => write!(f, "field `{field}` is not finite"),
        }
    }
}

/// Core SignSeq errors
#[derive(Error, Debug)]
pub enum SignSeqError {
    // Data errors
    #[error("Empty input: a capture needs at least one frame")]
    EmptyInput,

    #[error("Invalid landmark {index} in group `{group}`: {issue}")]
    Validation {
        group: LandmarkGroup,
        index: usize,
        issue: LandmarkIssue,
    },

    #[error("Malformed capture payload: {0}")]
    Json(#[from] serde_json::Error),

    // Logic errors
    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    Shape {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl SignSeqError {
    pub fn validation(group: LandmarkGroup, index: usize, issue: LandmarkIssue) -> Self {
        SignSeqError::Validation {
            group,
            index,
            issue,
        }
    }

    pub fn shape(expected: (usize, usize), actual: (usize, usize)) -> Self {
        SignSeqError::Shape { expected, actual }
    }
}

/// Rejected augmentation settings
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Probability `{name}` must be within [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },

    #[error("Range `{name}` is invalid: [{low}, {high}]")]
    InvalidRange {
        name: &'static str,
        low: f32,
        high: f32,
    },

    #[error("Jitter sigma must be finite and non-negative, got {0}")]
    InvalidSigma(f32),

    #[error("Factor `{name}` must be finite and within (0, {max}], got {value}")]
    InvalidFactor {
        name: &'static str,
        value: f32,
        max: f32,
    },
}

/// Result type for SignSeq operations
pub type SignSeqResult<T> = Result<T, SignSeqError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_names_group_and_field() {
        let err = SignSeqError::validation(
            LandmarkGroup::LeftHand,
            3,
            LandmarkIssue::MissingField("z"),
        );
        let msg = err.to_string();
        assert!(msg.contains("left_hand"));
        assert!(msg.contains("`z`"));
        assert!(msg.contains('3'));
    }

    #[test]
    fn test_config_error_converts() {
        let err: SignSeqError = ConfigError::InvalidSigma(-1.0).into();
        assert!(matches!(err, SignSeqError::Config(_)));
    }
}
