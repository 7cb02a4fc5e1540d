//! V4L2 webcam access.
//!
//! Currently, only V4L2 `VIDEO_CAPTURE` devices yielding JFIF JPEG or Motion
//! JPEG frames are supported.

use std::env;

use anyhow::bail;
use linuxvideo::{
    format::{PixFormat, Pixelformat},
    stream::ReadStream,
    BufType, CapabilityFlags, Device, Fract,
};

use crate::image::Image;
use crate::timer::Timer;
use crate::video::FrameSource;

const ENV_VAR_WEBCAM_NAME: &str = "YUBI_WEBCAM_NAME";

/// Resolution requested from the driver; the driver may pick something else,
/// which is accepted as-is.
const REQUESTED_RESOLUTION: (u32, u32) = (1280, 720);

/// A webcam yielding a stream of [`Image`]s.
///
/// The capture device is held for the lifetime of this value and released
/// when it is dropped.
pub struct Webcam {
    stream: ReadStream,
    width: u32,
    height: u32,
    t_dequeue: Timer,
    t_decode: Timer,
}

impl Webcam {
    /// Opens the first supported webcam found.
    ///
    /// If the `YUBI_WEBCAM_NAME` environment variable is set, only the device
    /// with that name is considered.
    ///
    /// This function can block for a significant amount of time while the
    /// webcam initializes (on the order of hundreds of milliseconds).
    pub fn open() -> anyhow::Result<Self> {
        if let Ok(name) = env::var(ENV_VAR_WEBCAM_NAME) {
            log::debug!(
                "webcam override: `{}` is set to '{}'",
                ENV_VAR_WEBCAM_NAME,
                name,
            );
        }
        for res in linuxvideo::list()? {
            match res {
                Ok(dev) => match Self::open_impl(dev) {
                    Ok(Some(webcam)) => return Ok(webcam),
                    Ok(None) => {}
                    Err(e) => {
                        log::debug!("{}", e);
                    }
                },
                Err(e) => {
                    log::warn!("{}", e);
                }
            }
        }

        bail!("no supported webcam device found")
    }

    fn open_impl(dev: Device) -> anyhow::Result<Option<Self>> {
        let caps = dev.capabilities()?;
        if let Ok(name) = env::var(ENV_VAR_WEBCAM_NAME) {
            if caps.card() != name {
                return Ok(None);
            }
        }

        let cap_flags = caps.device_capabilities();
        let path = dev.path()?;
        log::debug!(
            "device {} ({}) capabilities: {:?}",
            caps.card(),
            path.display(),
            cap_flags,
        );

        if !cap_flags.contains(CapabilityFlags::VIDEO_CAPTURE) {
            return Ok(None);
        }

        let mut pixel_format = None;
        for format in dev.formats(BufType::VIDEO_CAPTURE) {
            let format = format?;
            if format.pixelformat() == Pixelformat::JPEG || format.pixelformat() == Pixelformat::MJPG
            {
                pixel_format = Some(format.pixelformat());
                break;
            }
        }
        let Some(pixel_format) = pixel_format else {
            return Ok(None);
        };

        let (width, height) = REQUESTED_RESOLUTION;
        let capture = dev.video_capture(PixFormat::new(width, height, pixel_format))?;

        // The driver may have adjusted the requested format.
        let format = capture.format();
        let width = format.width();
        let height = format.height();

        let actual = capture.set_frame_interval(Fract::new(1, 30))?;

        log::info!(
            "opened {} ({}), {}x{} @ {:.1}Hz",
            caps.card(),
            path.display(),
            width,
            height,
            1.0 / actual.as_f32(),
        );

        let stream = capture.into_stream(2)?;

        Ok(Some(Self {
            stream,
            width,
            height,
            t_dequeue: Timer::new("dequeue"),
            t_decode: Timer::new("decode"),
        }))
    }

    /// Reads the next frame from the camera.
    ///
    /// If no frame is available, this method will block until one is. An
    /// error means the camera stopped delivering frames; a frame that merely
    /// fails to *decode* is replaced by a blank image instead, since even
    /// good webcams occasionally produce a corrupted MJPG frame.
    pub fn read(&mut self) -> anyhow::Result<Image> {
        let dequeue_guard = self.t_dequeue.start();
        self.stream
            .dequeue(|buf| {
                drop(dequeue_guard);
                let image = match self.t_decode.time(|| Image::decode_jpeg(&buf)) {
                    Ok(image) => image,
                    Err(e) => {
                        log::error!("webcam decode error: {}", e);
                        Image::new(self.width, self.height)
                    }
                };
                Ok(image)
            })
            .map_err(Into::into)
    }

    /// Returns profiling timers for webcam access and decoding.
    pub fn timers(&self) -> impl Iterator<Item = &Timer> + '_ {
        [&self.t_dequeue, &self.t_decode].into_iter()
    }
}

impl FrameSource for Webcam {
    fn read(&mut self) -> anyhow::Result<Image> {
        Webcam::read(self)
    }

    fn timers(&self) -> impl Iterator<Item = &Timer> {
        Webcam::timers(self)
    }
}
