//! Feature Layout - Where each landmark group lives in the flattened vector
//!
//! Every encoded frame is a row of [`FEATURE_DIM`] values. Groups occupy
//! contiguous column blocks in the order pose, left hand, right hand; within
//! a block, landmark `i` owns `values_per_landmark` consecutive columns
//! (`x, y, z[, visibility]`).
//!
//! Face landmarks are not part of the layout.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Frames per normalized sequence
pub const SEQUENCE_LENGTH: usize = 60;

/// Columns per encoded frame
pub const FEATURE_DIM: usize = 226;

/// Upper-body pose landmarks
pub const POSE_LANDMARKS: usize = 25;

/// Landmarks per hand
pub const HAND_LANDMARKS: usize = 21;

/// Landmark groups that are encoded into the feature vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandmarkGroup {
    Pose,
    LeftHand,
    RightHand,
}

impl LandmarkGroup {
    /// All encoded groups in column order
    pub fn all() -> &'static [LandmarkGroup] {
        &[
            LandmarkGroup::Pose,
            LandmarkGroup::LeftHand,
            LandmarkGroup::RightHand,
        ]
    }

    /// Wire name of the group
    pub fn name(&self) -> &'static str {
        match self {
            LandmarkGroup::Pose => "pose",
            LandmarkGroup::LeftHand => "left_hand",
            LandmarkGroup::RightHand => "right_hand",
        }
    }

    /// Values stored per landmark: pose carries visibility, hands do not
    pub fn values_per_landmark(&self) -> usize {
        match self {
            LandmarkGroup::Pose => 4,
            LandmarkGroup::LeftHand | LandmarkGroup::RightHand => 3,
        }
    }

    /// Whether landmarks of this group must carry a visibility score
    pub fn has_visibility(&self) -> bool {
        matches!(self, LandmarkGroup::Pose)
    }

    /// The group a landmark moves to under left/right mirroring
    pub fn mirrored(&self) -> LandmarkGroup {
        match self {
            LandmarkGroup::Pose => LandmarkGroup::Pose,
            LandmarkGroup::LeftHand => LandmarkGroup::RightHand,
            LandmarkGroup::RightHand => LandmarkGroup::LeftHand,
        }
    }
}

impl fmt::Display for LandmarkGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Column block of one landmark group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupLayout {
    pub group: LandmarkGroup,
    /// Fixed number of landmark slots
    pub cardinality: usize,
    pub values_per_landmark: usize,
    /// First column of the block
    pub offset: usize,
}

impl GroupLayout {
    const fn new(
        group: LandmarkGroup,
        cardinality: usize,
        values_per_landmark: usize,
        offset: usize,
    ) -> Self {
        Self {
            group,
            cardinality,
            values_per_landmark,
            offset,
        }
    }

    /// Number of columns in the block
    pub const fn width(&self) -> usize {
        self.cardinality * self.values_per_landmark
    }

    /// One past the last column of the block
    pub const fn end(&self) -> usize {
        self.offset + self.width()
    }

    pub fn columns(&self) -> Range<usize> {
        self.offset..self.end()
    }

    /// Columns owned by landmark slot `index`
    pub fn landmark_columns(&self, index: usize) -> Range<usize> {
        let start = self.offset + index * self.values_per_landmark;
        start..start + self.values_per_landmark
    }

    /// Column of each landmark's x coordinate
    pub fn x_columns(&self) -> impl Iterator<Item = usize> {
        self.columns().step_by(self.values_per_landmark)
    }
}

/// Full feature layout: pose block, then left hand, then right hand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureLayout {
    pose: GroupLayout,
    left_hand: GroupLayout,
    right_hand: GroupLayout,
}

impl FeatureLayout {
    /// Build a layout from per-group cardinalities. Offsets follow from the
    /// block order.
    pub const fn new(
        pose_landmarks: usize,
        left_hand_landmarks: usize,
        right_hand_landmarks: usize,
    ) -> Self {
        let pose = GroupLayout::new(LandmarkGroup::Pose, pose_landmarks, 4, 0);
        let left_hand =
            GroupLayout::new(LandmarkGroup::LeftHand, left_hand_landmarks, 3, pose.end());
        let right_hand =
            GroupLayout::new(LandmarkGroup::RightHand, right_hand_landmarks, 3, left_hand.end());
        Self {
            pose,
            left_hand,
            right_hand,
        }
    }

    /// 25 pose landmarks, 21 per hand
    pub const fn standard() -> Self {
        Self::new(POSE_LANDMARKS, HAND_LANDMARKS, HAND_LANDMARKS)
    }

    /// Total number of columns
    pub const fn width(&self) -> usize {
        self.right_hand.end()
    }

    pub fn group(&self, group: LandmarkGroup) -> &GroupLayout {
        match group {
            LandmarkGroup::Pose => &self.pose,
            LandmarkGroup::LeftHand => &self.left_hand,
            LandmarkGroup::RightHand => &self.right_hand,
        }
    }

    /// Group blocks in column order
    pub fn groups(&self) -> [&GroupLayout; 3] {
        [&self.pose, &self.left_hand, &self.right_hand]
    }

    /// Every x column across all blocks, ascending
    pub fn x_columns(&self) -> Vec<usize> {
        self.groups()
            .into_iter()
            .flat_map(|g| g.x_columns())
            .collect()
    }
}

impl Default for FeatureLayout {
    fn default() -> Self {
        Self::standard()
    }
}

/// The layout every normalized sequence uses
pub const STANDARD_LAYOUT: FeatureLayout = FeatureLayout::standard();

const _: () = assert!(STANDARD_LAYOUT.width() == FEATURE_DIM);
