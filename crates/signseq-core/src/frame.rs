//! Frames and captures
//!
//! A [`Frame`] is one time-sampled observation from the landmark extractor.
//! Each encoded group has its own slot; an absent group and an empty group
//! are the same thing (the part was out of view). The face slot is kept so
//! older captures parse, but nothing downstream reads it.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{LandmarkGroup, RawLandmark, SignSeqResult};

/// Landmark groups of one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameLandmarks {
    #[serde(default, deserialize_with = "nullable_group")]
    pub pose: Vec<RawLandmark>,
    #[serde(default, deserialize_with = "nullable_group")]
    pub left_hand: Vec<RawLandmark>,
    #[serde(default, deserialize_with = "nullable_group")]
    pub right_hand: Vec<RawLandmark>,
    /// Collected by older captures, never encoded. Entries are kept as
    /// opaque JSON so a malformed face record cannot reject the frame.
    #[serde(
        default,
        deserialize_with = "opaque_group",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub face: Vec<Value>,
}

fn nullable_group<'de, D>(deserializer: D) -> Result<Vec<RawLandmark>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<RawLandmark>>::deserialize(deserializer)?.unwrap_or_default())
}

fn opaque_group<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(entries) => Ok(entries),
        _ => Ok(Vec::new()),
    }
}

/// One observation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Milliseconds since capture start
    #[serde(default)]
    pub timestamp: f64,

    #[serde(default)]
    pub landmarks: FrameLandmarks,
}

impl Frame {
    /// Frame with every group empty
    pub fn new(timestamp: f64) -> Self {
        Self {
            timestamp,
            landmarks: FrameLandmarks::default(),
        }
    }

    /// Replace one encoded group
    pub fn with_group(mut self, group: LandmarkGroup, landmarks: Vec<RawLandmark>) -> Self {
        *self.group_mut(group) = landmarks;
        self
    }

    pub fn with_face(mut self, landmarks: Vec<RawLandmark>) -> Self {
        self.landmarks.face = landmarks
            .iter()
            .map(|lm| serde_json::to_value(lm).unwrap_or_default())
            .collect();
        self
    }

    /// Landmarks of an encoded group (empty if absent)
    pub fn group(&self, group: LandmarkGroup) -> &[RawLandmark] {
        match group {
            LandmarkGroup::Pose => &self.landmarks.pose,
            LandmarkGroup::LeftHand => &self.landmarks.left_hand,
            LandmarkGroup::RightHand => &self.landmarks.right_hand,
        }
    }

    fn group_mut(&mut self, group: LandmarkGroup) -> &mut Vec<RawLandmark> {
        match group {
            LandmarkGroup::Pose => &mut self.landmarks.pose,
            LandmarkGroup::LeftHand => &mut self.landmarks.left_hand,
            LandmarkGroup::RightHand => &mut self.landmarks.right_hand,
        }
    }

    /// True when no encoded group holds a landmark
    pub fn is_blank(&self) -> bool {
        LandmarkGroup::all().iter().all(|g| self.group(*g).is_empty())
    }
}

/// A whole upload: who recorded which gesture, and its frames
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Capture {
    #[serde(default)]
    pub user: Option<String>,
    pub label: String,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub frames: Vec<Frame>,
}

impl Capture {
    pub fn new(label: impl Into<String>, frames: Vec<Frame>) -> Self {
        Self {
            user: None,
            label: label.into(),
            session_id: None,
            frames,
        }
    }

    /// Parse an upload body
    pub fn from_json(data: &str) -> SignSeqResult<Self> {
        Ok(serde_json::from_str(data)?)
    }

    /// Capture duration from first to last timestamp
    pub fn duration_ms(&self) -> f64 {
        match (self.frames.first(), self.frames.last()) {
            (Some(first), Some(last)) => (last.timestamp - first.timestamp).max(0.0),
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_null_groups_are_empty() {
        let frame: Frame = serde_json::from_str(
            r#"{"timestamp": 33, "landmarks": {"pose": null, "right_hand": []}}"#,
        )
        .unwrap();

        assert_eq!(frame.timestamp, 33.0);
        assert!(frame.group(LandmarkGroup::Pose).is_empty());
        assert!(frame.group(LandmarkGroup::LeftHand).is_empty());
        assert!(frame.is_blank());
    }

    #[test]
    fn test_unknown_groups_ignored() {
        let frame: Frame = serde_json::from_str(
            r#"{"timestamp": 0, "landmarks": {
                "left_hand": [{"x": 0.3, "y": 0.6, "z": 0.1}],
                "feet": [{"x": 1.0}]
            }}"#,
        )
        .unwrap();

        assert_eq!(frame.group(LandmarkGroup::LeftHand).len(), 1);
        assert!(!frame.is_blank());
    }

    #[test]
    fn test_face_only_frame_is_blank() {
        let frame = Frame::new(0.0).with_face(vec![RawLandmark::new(0.5, 0.5, 0.0); 10]);
        assert!(frame.is_blank());
    }

    #[test]
    fn test_malformed_face_is_ignored() {
        let capture = Capture::from_json(
            r#"{
                "label": "hello",
                "frames": [{"timestamp": 0, "landmarks": {
                    "pose": [{"x": 0.5, "y": 0.5, "z": 0.0, "visibility": 0.9}],
                    "face": [{"x": "0.5", "y": 0.3, "z": 0.0}, null, 7]
                }}, {"timestamp": 33, "landmarks": {"face": {"not": "a list"}}}]
            }"#,
        )
        .unwrap();

        assert_eq!(capture.frames[0].landmarks.face.len(), 3);
        assert_eq!(capture.frames[0].group(LandmarkGroup::Pose).len(), 1);
        assert!(capture.frames[1].landmarks.face.is_empty());
        assert!(capture.frames[1].is_blank());
    }

    #[test]
    fn test_capture_from_json() {
        let capture = Capture::from_json(
            r#"{
                "user": "frontend_user",
                "label": "hello_world",
                "session_id": "react_session_1",
                "frames": [
                    {"timestamp": 0, "landmarks": {"pose": [{"x": 0.5, "y": 0.5, "z": 0.0, "visibility": 0.9}]}},
                    {"timestamp": 33, "landmarks": {}}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(capture.user.as_deref(), Some("frontend_user"));
        assert_eq!(capture.label, "hello_world");
        assert_eq!(capture.frames.len(), 2);
        assert_eq!(capture.duration_ms(), 33.0);
    }

    #[test]
    fn test_capture_malformed_json() {
        assert!(Capture::from_json("{not json").is_err());
    }
}
