//! The 21-landmark hand and the pose-model boundary.
//!
//! Hand detection and landmark regression are performed by an external pose
//! model that this crate only consumes, through the [`PoseNetwork`] trait.
//! Everything here assumes the model's fixed landmark convention: 21 points
//! per hand, at the semantic indices named by [`LandmarkIdx`].

use anyhow::bail;

use crate::image::{draw, Color, Image};
use crate::landmark::{Landmark, Landmarks};

/// Number of landmarks the pose model assigns to one hand.
pub const NUM_LANDMARKS: usize = 21;

/// Names for the hand landmarks, in the pose model's fixed index order.
///
/// # Terminology
///
/// - **CMC**: Carpometacarpal joint, the lowest joint of the thumb, located near the wrist.
/// - **MCP**: Metacarpophalangeal joint, the knuckle joint near the palm.
/// - **PIP**: Proximal Interphalangeal joint, the joint between the MCP and DIP.
/// - **DIP**: Distal Interphalangeal joint, the highest joint of a finger.
/// - **Tip**: Placed on the tip of the finger, above the DIP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandmarkIdx {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexFingerMcp,
    IndexFingerPip,
    IndexFingerDip,
    IndexFingerTip,
    MiddleFingerMcp,
    MiddleFingerPip,
    MiddleFingerDip,
    MiddleFingerTip,
    RingFingerMcp,
    RingFingerPip,
    RingFingerDip,
    RingFingerTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

const CONNECTIVITY: &[(LandmarkIdx, LandmarkIdx)] = {
    use LandmarkIdx::*;
    &[
        // Surround the palm:
        (Wrist, ThumbCmc),
        (ThumbCmc, IndexFingerMcp),
        (IndexFingerMcp, MiddleFingerMcp),
        (MiddleFingerMcp, RingFingerMcp),
        (RingFingerMcp, PinkyMcp),
        (PinkyMcp, Wrist),
        // Thumb:
        (ThumbCmc, ThumbMcp),
        (ThumbMcp, ThumbIp),
        (ThumbIp, ThumbTip),
        // Index:
        (IndexFingerMcp, IndexFingerPip),
        (IndexFingerPip, IndexFingerDip),
        (IndexFingerDip, IndexFingerTip),
        // Middle:
        (MiddleFingerMcp, MiddleFingerPip),
        (MiddleFingerPip, MiddleFingerDip),
        (MiddleFingerDip, MiddleFingerTip),
        // Ring:
        (RingFingerMcp, RingFingerPip),
        (RingFingerPip, RingFingerDip),
        (RingFingerDip, RingFingerTip),
        // Pinky:
        (PinkyMcp, PinkyPip),
        (PinkyPip, PinkyDip),
        (PinkyDip, PinkyTip),
    ]
};

/// One detected hand: exactly [`NUM_LANDMARKS`] landmarks in normalized image
/// coordinates.
///
/// A [`Hand`] only lives for the frame it was detected in. It is produced by a
/// [`PoseNetwork`], classified, drawn, and discarded.
#[derive(Clone)]
pub struct Hand {
    landmarks: Landmarks,
}

impl Hand {
    /// Wraps a set of landmarks produced by the pose model.
    ///
    /// Returns an error if `landmarks` does not contain exactly
    /// [`NUM_LANDMARKS`] entries. A wrong count means the pose model violated
    /// its output contract, so this fails fast instead of letting consumers
    /// index out of bounds later.
    pub fn from_landmarks(landmarks: Landmarks) -> anyhow::Result<Self> {
        if landmarks.len() != NUM_LANDMARKS {
            bail!(
                "pose model contract violation: hand has {} landmarks, expected {}",
                landmarks.len(),
                NUM_LANDMARKS,
            );
        }
        Ok(Self { landmarks })
    }

    pub fn landmarks(&self) -> &Landmarks {
        &self.landmarks
    }

    /// Returns the landmark at a semantic index.
    #[inline]
    pub fn landmark(&self, idx: LandmarkIdx) -> Landmark {
        self.landmarks.get(idx as usize)
    }

    /// Draws the hand's skeleton and landmarks onto `target`.
    ///
    /// Normalized landmark coordinates are scaled to the target's size.
    pub fn draw(&self, target: &mut Image) {
        let (w, h) = (target.width() as f32, target.height() as f32);
        let pixel = |lm: Landmark| ((lm.x() * w) as i32, (lm.y() * h) as i32);

        for &(a, b) in CONNECTIVITY {
            let (ax, ay) = pixel(self.landmark(a));
            let (bx, by) = pixel(self.landmark(b));
            draw::line(target, ax, ay, bx, by).color(Color::GREEN);
        }
        for lm in self.landmarks.iter() {
            let (x, y) = pixel(lm);
            draw::marker(target, x, y);
        }
    }
}

/// Configuration forwarded verbatim to the pose model.
///
/// The values are never interpreted by this crate; what exactly they mean is
/// up to the [`PoseNetwork`] implementation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseOptions {
    min_detection_confidence: f32,
    min_tracking_confidence: f32,
}

impl Default for PoseOptions {
    fn default() -> Self {
        Self {
            min_detection_confidence: 0.7,
            min_tracking_confidence: 0.7,
        }
    }
}

impl PoseOptions {
    /// Sets the minimum confidence for a hand detection to be reported.
    #[inline]
    pub fn min_detection_confidence(mut self, confidence: f32) -> Self {
        self.min_detection_confidence = confidence;
        self
    }

    /// Sets the minimum confidence for a hand to keep being tracked across frames.
    #[inline]
    pub fn min_tracking_confidence(mut self, confidence: f32) -> Self {
        self.min_tracking_confidence = confidence;
        self
    }

    #[inline]
    pub fn detection_confidence(&self) -> f32 {
        self.min_detection_confidence
    }

    #[inline]
    pub fn tracking_confidence(&self) -> f32 {
        self.min_tracking_confidence
    }
}

/// The hand-pose estimation boundary.
///
/// Implementations wrap an external detection and landmark regression model.
/// This crate never implements (or approximates) the model itself, it only
/// consumes the landmarks.
pub trait PoseNetwork {
    /// Detects all hands visible in `image`.
    ///
    /// Returns an empty [`Vec`] when no hand is in view; that is not an
    /// error. Every returned [`Hand`] follows the 21-landmark convention.
    fn detect(&mut self, image: &Image, options: &PoseOptions) -> anyhow::Result<Vec<Hand>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landmark_index_convention() {
        use LandmarkIdx::*;
        assert_eq!(ThumbIp as usize, 3);
        assert_eq!(ThumbTip as usize, 4);
        assert_eq!(IndexFingerPip as usize, 6);
        assert_eq!(IndexFingerTip as usize, 8);
        assert_eq!(MiddleFingerPip as usize, 10);
        assert_eq!(MiddleFingerTip as usize, 12);
        assert_eq!(RingFingerPip as usize, 14);
        assert_eq!(RingFingerTip as usize, 16);
        assert_eq!(PinkyPip as usize, 18);
        assert_eq!(PinkyTip as usize, 20);
    }

    #[test]
    fn rejects_wrong_landmark_count() {
        assert!(Hand::from_landmarks(Landmarks::new(20)).is_err());
        assert!(Hand::from_landmarks(Landmarks::new(22)).is_err());
        assert!(Hand::from_landmarks(Landmarks::new(0)).is_err());
        assert!(Hand::from_landmarks(Landmarks::new(NUM_LANDMARKS)).is_ok());
    }

    #[test]
    fn default_options() {
        let options = PoseOptions::default();
        assert_eq!(options.detection_confidence(), 0.7);
        assert_eq!(options.tracking_confidence(), 0.7);

        let options = PoseOptions::default().min_detection_confidence(0.5);
        assert_eq!(options.detection_confidence(), 0.5);
        assert_eq!(options.tracking_confidence(), 0.7);
    }
}
