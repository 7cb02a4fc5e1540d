//! Per-frame aggregation and the capture loop.
//!
//! Every frame is processed from scratch: detect hands, count fingers on
//! each, overlay the total, show the result. Nothing is carried over to the
//! next frame; there is no smoothing or temporal filtering.

use crate::fingers;
use crate::gui;
use crate::hand::{Hand, PoseNetwork, PoseOptions};
use crate::image::{draw, Color, Image};
use crate::timer::FpsCounter;
use crate::video::FrameSource;

/// Pixel position of the finger-count overlay.
const OVERLAY_POS: (i32, i32) = (50, 50);

/// Sums the extended-finger counts over all hands in a frame.
///
/// An empty slice yields 0. The sum is commutative, so the order of `hands`
/// does not matter.
pub fn total_fingers(hands: &[Hand]) -> u32 {
    hands
        .iter()
        .map(|hand| u32::from(fingers::count_extended(hand)))
        .sum()
}

/// Draws the per-hand landmarks and the finger-count overlay onto `image`,
/// returning the total count.
///
/// The overlay text is only drawn when at least one hand is in the frame; a
/// frame without hands is left untouched.
pub fn annotate(image: &mut Image, hands: &[Hand]) -> u32 {
    let total = total_fingers(hands);

    for hand in hands {
        hand.draw(image);
    }
    if !hands.is_empty() {
        draw::text(
            image,
            OVERLAY_POS.0,
            OVERLAY_POS.1,
            &format!("Total Fingers: {total}"),
        )
        .color(Color::GREEN);
    }

    total
}

/// Runs the frame loop: capture, detect, classify, render, display.
///
/// The loop is single-threaded and synchronous. It exits when
/// [`gui::stop_requested`] reports a stop (the `q` key, or the window being
/// closed), or when `source` fails to produce a frame. A capture failure is
/// terminal; there are no retries. `source` is dropped (and the capture
/// device released) on every exit path.
///
/// Must be called from within [`gui::run`], which owns the display.
pub fn run<S, M>(mut source: S, mut model: M) -> anyhow::Result<()>
where
    S: FrameSource,
    M: PoseNetwork,
{
    let options = PoseOptions::default();
    let mut fps = FpsCounter::new("frame loop");

    while !gui::stop_requested() {
        let mut image = match source.read() {
            Ok(image) => image,
            Err(e) => {
                log::error!("capture source stopped: {e}");
                break;
            }
        };

        let hands = model.detect(&image, &options)?;
        let total = annotate(&mut image, &hands);
        log::trace!("{} hand(s), {} finger(s)", hands.len(), total);

        gui::show_image(&image);
        fps.tick_with(source.timers());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingers::Finger;
    use crate::hand::NUM_LANDMARKS;
    use crate::landmark::{Landmark, Landmarks};

    /// Builds a hand with exactly `extended` raised fingers (thumb first).
    fn hand_with_count(extended: usize) -> Hand {
        assert!(extended <= 5);
        let mut landmarks = Landmarks::new(NUM_LANDMARKS);
        for (i, finger) in Finger::ALL.into_iter().enumerate() {
            let raise = i < extended;
            let (tip, base) = match finger {
                // The thumb compares X; smaller X means extended.
                Finger::Thumb => ([if raise { 0.3 } else { 0.7 }, 0.5], [0.5, 0.5]),
                _ => ([0.5, if raise { 0.3 } else { 0.7 }], [0.5, 0.5]),
            };
            landmarks.set(finger.tip() as usize, Landmark::new([tip[0], tip[1], 0.0]));
            landmarks.set(finger.base() as usize, Landmark::new([base[0], base[1], 0.0]));
        }
        Hand::from_landmarks(landmarks).unwrap()
    }

    struct UnpluggedSource;

    impl FrameSource for UnpluggedSource {
        fn read(&mut self) -> anyhow::Result<Image> {
            anyhow::bail!("device unplugged")
        }
    }

    struct NoHands;

    impl PoseNetwork for NoHands {
        fn detect(
            &mut self,
            _image: &Image,
            _options: &PoseOptions,
        ) -> anyhow::Result<Vec<Hand>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn capture_failure_ends_the_loop() {
        run(UnpluggedSource, NoHands).unwrap();
    }

    #[test]
    fn sums_across_hands() {
        let hands = [hand_with_count(3), hand_with_count(2)];
        assert_eq!(total_fingers(&hands), 5);
        // Commutative.
        let hands = [hand_with_count(2), hand_with_count(3)];
        assert_eq!(total_fingers(&hands), 5);
    }

    #[test]
    fn no_hands_counts_zero() {
        assert_eq!(total_fingers(&[]), 0);
    }

    #[test]
    fn no_overlay_without_hands() {
        let blank = Image::new(640, 480);
        let mut image = blank.clone();
        assert_eq!(annotate(&mut image, &[]), 0);
        assert_eq!(image.data(), blank.data());
    }

    #[test]
    fn overlay_drawn_with_hands() {
        let blank = Image::new(640, 480);
        let mut image = blank.clone();
        assert_eq!(annotate(&mut image, &[hand_with_count(4)]), 4);
        assert_ne!(image.data(), blank.data());
    }
}
