//! Synthetic captures shaped like the capture front end's uploads.
//!
//! 25 upper-body pose landmarks with visibility and 21 landmarks per hand,
//! drifting slowly over time. Everything is driven by a seeded [`StdRng`],
//! so the same config always yields the same capture.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use signseq_core::{
    Capture, Frame, LandmarkGroup, RawLandmark, SignSeqResult, HAND_LANDMARKS, POSE_LANDMARKS,
};

/// Face mesh size sent by older captures
pub const LEGACY_FACE_LANDMARKS: usize = 468;

/// Synthetic capture configuration
#[derive(Clone, Debug)]
pub struct SyntheticConfig {
    /// Number of frames
    pub frames: usize,
    /// Capture rate
    pub fps: f64,
    /// Probability that a hand is out of view in a frame (0.0 - 1.0)
    pub hand_dropout: f64,
    /// Uniform coordinate noise amplitude
    pub noise: f32,
    /// Attach a face mesh to every frame
    pub include_face: bool,
    /// Random seed
    pub seed: u64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        SyntheticConfig {
            frames: 90,
            fps: 30.0,
            hand_dropout: 0.0,
            noise: 0.0,
            include_face: false,
            seed: 42,
        }
    }
}

impl SyntheticConfig {
    /// Short, noiseless capture
    pub fn clean() -> Self {
        SyntheticConfig {
            frames: 30,
            ..Default::default()
        }
    }

    /// Jittery tracking with hands dropping in and out
    pub fn noisy() -> Self {
        SyntheticConfig {
            frames: 120,
            hand_dropout: 0.2,
            noise: 0.01,
            ..Default::default()
        }
    }

    /// Older capture format that still sends face landmarks
    pub fn legacy_with_face() -> Self {
        SyntheticConfig {
            include_face: true,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_frames(mut self, frames: usize) -> Self {
        self.frames = frames;
        self
    }
}

/// Deterministic capture generator
pub struct SyntheticCaptures {
    config: SyntheticConfig,
    rng: StdRng,
}

impl SyntheticCaptures {
    pub fn new(config: SyntheticConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self { config, rng }
    }

    /// Generate the next capture
    pub fn capture(&mut self, user: &str, label: &str) -> Capture {
        let frames = (0..self.config.frames).map(|t| self.frame(t)).collect();
        Capture {
            user: Some(user.to_string()),
            label: label.to_string(),
            session_id: Some(format!("synthetic_{}_{}", user, self.rng.gen::<u32>())),
            frames,
        }
    }

    fn frame(&mut self, t: usize) -> Frame {
        let timestamp = t as f64 * 1000.0 / self.config.fps;
        let drift = t as f32;

        let pose = (0..POSE_LANDMARKS)
            .map(|i| {
                let i = i as f32;
                RawLandmark::with_visibility(
                    0.5 + (i / 100.0) * 0.1 + self.noise(),
                    0.5 + (drift / 100.0) * 0.1 + self.noise(),
                    -0.1 + (i / 200.0) * 0.05,
                    if i < 20.0 { 0.9 } else { 0.7 },
                )
            })
            .collect();

        let mut frame = Frame::new(timestamp).with_group(LandmarkGroup::Pose, pose);

        for (group, base_x) in [(LandmarkGroup::LeftHand, 0.3), (LandmarkGroup::RightHand, 0.7)] {
            if self.rng.gen::<f64>() < self.config.hand_dropout {
                continue;
            }
            let hand = (0..HAND_LANDMARKS)
                .map(|i| {
                    let i = i as f32;
                    RawLandmark::new(
                        base_x + (i / 50.0) * 0.1 + self.noise(),
                        0.6 + (drift / 150.0) * 0.05 + self.noise(),
                        0.1 + (i / 100.0) * 0.03,
                    )
                })
                .collect();
            frame = frame.with_group(group, hand);
        }

        if self.config.include_face {
            let face = vec![RawLandmark::new(0.5, 0.25, 0.0); LEGACY_FACE_LANDMARKS];
            frame = frame.with_face(face);
        }

        frame
    }

    fn noise(&mut self) -> f32 {
        if self.config.noise > 0.0 {
            self.rng.gen_range(-self.config.noise..=self.config.noise)
        } else {
            0.0
        }
    }
}

/// A capture of `frames` copies of the same frame
pub fn constant_capture(frame: &Frame, frames: usize) -> Capture {
    Capture::new("constant", vec![frame.clone(); frames])
}

/// Serialize a capture the way the front end uploads it
pub fn capture_json(capture: &Capture) -> SignSeqResult<String> {
    Ok(serde_json::to_string(capture)?)
}
