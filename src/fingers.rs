//! Finger state classification.
//!
//! Each finger is classified as [`Extended`] or [`Folded`] by comparing two of
//! the hand's landmarks. The rule is a fixed-geometry heuristic that assumes
//! an upright hand seen by an unrotated camera; a hand held sideways or
//! upside-down *will* be misclassified. That is a known, accepted limitation
//! of the rule, not a bug.
//!
//! [`Extended`]: FingerState::Extended
//! [`Folded`]: FingerState::Folded

use crate::hand::{Hand, LandmarkIdx};

/// The five fingers of a [`Hand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    /// All fingers, in thumb-to-pinky order.
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    /// Returns the landmark at this finger's tip.
    pub fn tip(self) -> LandmarkIdx {
        use LandmarkIdx::*;
        match self {
            Finger::Thumb => ThumbTip,
            Finger::Index => IndexFingerTip,
            Finger::Middle => MiddleFingerTip,
            Finger::Ring => RingFingerTip,
            Finger::Pinky => PinkyTip,
        }
    }

    /// Returns the landmark the tip is compared against: the IP joint for the
    /// thumb (one joint below the tip), the PIP joint for all other fingers.
    pub fn base(self) -> LandmarkIdx {
        use LandmarkIdx::*;
        match self {
            Finger::Thumb => ThumbIp,
            Finger::Index => IndexFingerPip,
            Finger::Middle => MiddleFingerPip,
            Finger::Ring => RingFingerPip,
            Finger::Pinky => PinkyPip,
        }
    }
}

/// Whether a finger is raised or curled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FingerState {
    Extended,
    Folded,
}

/// Classifies a single finger of `hand`.
///
/// A non-thumb finger is extended iff its tip is *above* its PIP joint in
/// image coordinates (`tip.y < base.y`, Y grows downward).
///
/// The thumb moves sideways rather than up when raised, so it compares X
/// instead: extended iff `tip.x < base.x`. This comparison direction assumes
/// a specific hand and camera orientation (right hand, palm facing an
/// unmirrored camera) and inverts for the opposite hand or a mirrored feed.
/// The asymmetry is kept as-is; see `DESIGN.md`.
pub fn finger_state(hand: &Hand, finger: Finger) -> FingerState {
    let tip = hand.landmark(finger.tip());
    let base = hand.landmark(finger.base());
    let extended = match finger {
        Finger::Thumb => tip.x() < base.x(),
        _ => tip.y() < base.y(),
    };
    if extended {
        FingerState::Extended
    } else {
        FingerState::Folded
    }
}

/// Counts the extended fingers of `hand`.
///
/// Pure function of the landmark positions; always returns a value in
/// `0..=5`.
pub fn count_extended(hand: &Hand) -> u8 {
    Finger::ALL
        .iter()
        .filter(|&&finger| finger_state(hand, finger) == FingerState::Extended)
        .count() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::{LandmarkIdx::*, NUM_LANDMARKS};
    use crate::landmark::{Landmark, Landmarks};

    /// Builds a hand with the given landmarks set and all others at the
    /// origin.
    fn hand_with(positions: &[(LandmarkIdx, f32, f32)]) -> Hand {
        let mut landmarks = Landmarks::new(NUM_LANDMARKS);
        for &(idx, x, y) in positions {
            landmarks.set(idx as usize, Landmark::new([x, y, 0.0]));
        }
        Hand::from_landmarks(landmarks).unwrap()
    }

    fn open_palm() -> Hand {
        hand_with(&[
            (ThumbTip, 0.3, 0.5),
            (ThumbIp, 0.4, 0.5),
            (IndexFingerTip, 0.45, 0.2),
            (IndexFingerPip, 0.45, 0.5),
            (MiddleFingerTip, 0.5, 0.15),
            (MiddleFingerPip, 0.5, 0.5),
            (RingFingerTip, 0.55, 0.2),
            (RingFingerPip, 0.55, 0.5),
            (PinkyTip, 0.6, 0.25),
            (PinkyPip, 0.6, 0.5),
        ])
    }

    fn fist() -> Hand {
        hand_with(&[
            (ThumbTip, 0.5, 0.5),
            (ThumbIp, 0.4, 0.5),
            (IndexFingerTip, 0.45, 0.6),
            (IndexFingerPip, 0.45, 0.5),
            (MiddleFingerTip, 0.5, 0.6),
            (MiddleFingerPip, 0.5, 0.5),
            (RingFingerTip, 0.55, 0.6),
            (RingFingerPip, 0.55, 0.5),
            (PinkyTip, 0.6, 0.6),
            (PinkyPip, 0.6, 0.5),
        ])
    }

    #[test]
    fn count_is_in_range() {
        for hand in [open_palm(), fist(), hand_with(&[])] {
            assert!(count_extended(&hand) <= 5);
        }
    }

    #[test]
    fn open_palm_counts_five() {
        assert_eq!(count_extended(&open_palm()), 5);
    }

    #[test]
    fn fist_counts_zero() {
        assert_eq!(count_extended(&fist()), 0);
    }

    #[test]
    fn idempotent() {
        let hand = open_palm();
        assert_eq!(count_extended(&hand), count_extended(&hand));
    }

    #[test]
    fn finger_flips_when_tip_drops_below_base() {
        for finger in [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky] {
            let raised = hand_with(&[(finger.tip(), 0.5, 0.3), (finger.base(), 0.5, 0.5)]);
            assert_eq!(finger_state(&raised, finger), FingerState::Extended);
            assert_eq!(count_extended(&raised), 1);

            let lowered = hand_with(&[(finger.tip(), 0.5, 0.7), (finger.base(), 0.5, 0.5)]);
            assert_eq!(finger_state(&lowered, finger), FingerState::Folded);
            assert_eq!(count_extended(&lowered), 0);
        }
    }

    #[test]
    fn thumb_flips_on_x_not_y() {
        let left_of_base = hand_with(&[(ThumbTip, 0.4, 0.5), (ThumbIp, 0.5, 0.5)]);
        assert_eq!(finger_state(&left_of_base, Finger::Thumb), FingerState::Extended);

        let right_of_base = hand_with(&[(ThumbTip, 0.6, 0.5), (ThumbIp, 0.5, 0.5)]);
        assert_eq!(finger_state(&right_of_base, Finger::Thumb), FingerState::Folded);

        // Y must not influence the thumb.
        let raised_but_right = hand_with(&[(ThumbTip, 0.6, 0.1), (ThumbIp, 0.5, 0.9)]);
        assert_eq!(finger_state(&raised_but_right, Finger::Thumb), FingerState::Folded);
    }

    #[test]
    fn three_raised_fingers() {
        // Thumb, index and ring extended; middle and pinky folded.
        let hand = hand_with(&[
            (ThumbTip, 0.3, 0.0),
            (ThumbIp, 0.5, 0.0),
            (IndexFingerTip, 0.0, 0.2),
            (IndexFingerPip, 0.0, 0.4),
            (MiddleFingerTip, 0.0, 0.6),
            (MiddleFingerPip, 0.0, 0.3),
            (RingFingerTip, 0.0, 0.25),
            (RingFingerPip, 0.0, 0.4),
            (PinkyTip, 0.0, 0.5),
            (PinkyPip, 0.0, 0.3),
        ]);
        assert_eq!(count_extended(&hand), 3);
    }

    #[test]
    fn all_tips_below_bases_counts_zero() {
        let hand = hand_with(&[
            (ThumbTip, 0.6, 0.0),
            (ThumbIp, 0.5, 0.0),
            (IndexFingerTip, 0.0, 0.5),
            (IndexFingerPip, 0.0, 0.4),
            (MiddleFingerTip, 0.0, 0.5),
            (MiddleFingerPip, 0.0, 0.4),
            (RingFingerTip, 0.0, 0.5),
            (RingFingerPip, 0.0, 0.4),
            (PinkyTip, 0.0, 0.5),
            (PinkyPip, 0.0, 0.4),
        ]);
        assert_eq!(count_extended(&hand), 0);
    }
}
