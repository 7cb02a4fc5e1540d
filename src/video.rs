//! Video frame input.

pub mod webcam;

use crate::image::Image;
use crate::timer::Timer;

/// A source of video frames.
///
/// A read error signals that the source has stopped producing frames (device
/// unplugged, end of stream). Callers must treat it as terminal and stop
/// reading; there is no partial-failure or retry behavior.
pub trait FrameSource {
    /// Reads the next frame, blocking until one is available.
    fn read(&mut self) -> anyhow::Result<Image>;

    /// Profiling timers for this source, logged alongside the frame loop's
    /// FPS. Sources with nothing to measure can keep the empty default.
    fn timers(&self) -> impl Iterator<Item = &Timer> {
        std::iter::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Still;

    impl FrameSource for Still {
        fn read(&mut self) -> anyhow::Result<Image> {
            Ok(Image::new(4, 4))
        }
    }

    #[test]
    fn timers_default_to_none() {
        assert_eq!(Still.timers().count(), 0);
    }
}
