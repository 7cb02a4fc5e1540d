//! A minimal single-window video display.
//!
//! `winit` insists on owning the main thread, so [`run`] takes over `main`:
//! it spawns the application closure on a worker thread and runs the event
//! loop itself. The application sends frames over with [`show_image`] and
//! polls [`stop_requested`] once per frame.

mod renderer;

use std::{
    panic::{catch_unwind, AssertUnwindSafe},
    process,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    },
};

use once_cell::sync::OnceCell;
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoopBuilder, EventLoopProxy},
};

use crate::image::{Image, Resolution};

use self::renderer::Renderer;

const WINDOW_TITLE: &str = "Finger Counting";

/// The key that requests a stop. Case-sensitive: only the lower-case
/// character counts.
const STOP_KEY: char = 'q';

static STOP: AtomicBool = AtomicBool::new(false);
static PROXY: OnceCell<Mutex<EventLoopProxy<Msg>>> = OnceCell::new();

#[derive(Debug)]
enum Msg {
    Frame { res: Resolution, data: Vec<u8> },
}

/// Returns whether the user has requested the application to stop, either by
/// pressing the stop key (`q`) or by closing the window.
///
/// The flag is polled, not delivered: check it once per loop iteration.
pub fn stop_requested() -> bool {
    STOP.load(Ordering::Relaxed)
}

/// Displays an image in the window, opening it on the first call.
///
/// Must be called from within the closure passed to [`run`].
pub fn show_image(image: &Image) {
    let proxy = PROXY.get().expect("gui::run is not running");

    // Image data is RGBA8 internally so that no conversion before GPU upload
    // is needed.
    let msg = Msg::Frame {
        res: image.resolution(),
        data: image.data().to_vec(),
    };

    // A closed event loop means the process is exiting; nobody is left to
    // care about this frame.
    proxy.lock().unwrap().send_event(msg).ok();
}

/// Takes over the main thread for the display and runs the application in
/// `cb` on a worker thread.
///
/// The process exits when `cb` returns: with status 0 on `Ok`, status 1 on
/// `Err` (after logging the error), and status 101 if `cb` panicked.
pub fn run<F>(cb: F) -> !
where
    F: FnOnce() -> anyhow::Result<()> + Send + 'static,
{
    let event_loop = EventLoopBuilder::with_user_event().build();
    PROXY
        .set(Mutex::new(event_loop.create_proxy()))
        .ok()
        .expect("gui::run called twice");

    std::thread::spawn(move || {
        match catch_unwind(AssertUnwindSafe(cb)) {
            Ok(Ok(())) => process::exit(0),
            Ok(Err(e)) => {
                log::error!("{:?}", e);
                process::exit(1);
            }
            Err(_payload) => {
                // The panic hook has printed the message and backtrace
                // already; exit with 101 to mimic libstd behavior.
                process::exit(101);
            }
        }
    });

    let mut renderer: Option<Renderer> = None;
    event_loop.run(move |event, target, flow| {
        *flow = ControlFlow::Wait;
        match event {
            Event::UserEvent(Msg::Frame { res, data }) => {
                let renderer = renderer.get_or_insert_with(|| {
                    log::debug!("creating window at {res}");
                    Renderer::open(target, WINDOW_TITLE, res).unwrap()
                });

                renderer.update_texture(res, &data);
                renderer.window().request_redraw();
            }
            Event::RedrawRequested(_) => {
                if let Some(renderer) = &mut renderer {
                    renderer.redraw();
                }
            }
            Event::WindowEvent {
                event: WindowEvent::ReceivedCharacter(ch),
                ..
            } if ch == STOP_KEY => {
                log::debug!("stop key pressed");
                STOP.store(true, Ordering::Relaxed);
            }
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                STOP.store(true, Ordering::Relaxed);
            }
            _ => {}
        }
    });
}
