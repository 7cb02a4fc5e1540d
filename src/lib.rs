//! Yubi counts raised fingers on a live webcam feed.
//!
//! A hand-pose model (an external collaborator, consumed through the
//! [`hand::PoseNetwork`] trait) produces 21 landmarks per visible hand. The
//! [`fingers`] module classifies each finger as extended or folded with a
//! fixed-geometry rule, and [`frame`] sums the result over all hands in a
//! frame and overlays it on the video.
//!
//! Landmark coordinates are normalized image coordinates in `0.0..=1.0`, with
//! the origin in the top-left corner and Y growing *downward*. The finger
//! rules depend on this convention.
//!
//! # Environment Variables
//!
//! * `YUBI_WEBCAM_NAME`: Forces the device to use for [`Webcam`]s. If unset,
//!   the first device that supports a compatible image format will be used.
//!
//! [`Webcam`]: video::webcam::Webcam

use log::LevelFilter;

pub mod fingers;
pub mod frame;
pub mod gui;
pub mod hand;
pub mod image;
pub mod landmark;
pub mod timer;
pub mod video;

/// macro-use only, not part of public API.
#[doc(hidden)]
pub fn init_logger(calling_crate: &'static str) {
    let log_level = LevelFilter::Debug;
    env_logger::Builder::new()
        .filter(Some(calling_crate), log_level)
        .filter(Some(env!("CARGO_PKG_NAME")), log_level)
        .filter(Some("wgpu"), LevelFilter::Warn)
        .parse_default_env()
        .try_init()
        .ok();
}

/// Initializes logging to *stderr*.
///
/// The calling crate and Yubi will log at *debug* level, `wgpu` at *warn*
/// level. `RUST_LOG` overrides both.
///
/// If a global logger is already registered, this macro will do nothing.
#[macro_export]
macro_rules! init_logger {
    () => {
        $crate::init_logger(env!("CARGO_CRATE_NAME"))
    };
}
