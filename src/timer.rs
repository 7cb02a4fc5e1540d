//! Performance measurement tools.

use std::{
    fmt,
    mem,
    sync::Mutex,
    time::{Duration, Instant},
};

/// A timer that can measure and average the time an operation takes.
///
/// Collected timings are averaged and reset when the timer is displayed using
/// `{}` ([`std::fmt::Display`]).
pub struct Timer {
    name: &'static str,
    state: Mutex<State>,
}

struct State {
    total: Duration,
    count: u32,
}

impl Timer {
    /// Creates a new timer.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: Mutex::new(State {
                total: Duration::ZERO,
                count: 0,
            }),
        }
    }

    /// Invokes a closure, measuring and recording the time it takes.
    pub fn time<T>(&self, timee: impl FnOnce() -> T) -> T {
        let _guard = self.start();
        timee()
    }

    /// Starts timing an operation using a drop guard.
    ///
    /// When the returned [`TimerGuard`] is dropped, the time between the call
    /// to `start` and the drop is measured and recorded.
    pub fn start(&self) -> TimerGuard<'_> {
        TimerGuard {
            start: Instant::now(),
            timer: self,
        }
    }

    fn stop(&self, start: Instant) {
        let duration = start.elapsed();
        let mut state = self.state.lock().unwrap();
        state.total += duration;
        state.count += 1;
    }
}

/// Displays the average recorded time and resets it.
impl fmt::Display for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut state = self.state.lock().unwrap();
        let total = mem::replace(&mut state.total, Duration::ZERO);
        let count = mem::replace(&mut state.count, 0);
        let avg_ms = if count == 0 {
            0.0
        } else {
            total.as_secs_f32() * 1000.0 / count as f32
        };

        write!(f, "{}: {count}x{avg_ms:.01}ms", self.name)
    }
}

/// Cloning a timer resets its collected timings.
impl Clone for Timer {
    fn clone(&self) -> Self {
        Self::new(self.name)
    }
}

/// Guard returned by [`Timer::start`]. Stops timing the operation when dropped.
pub struct TimerGuard<'a> {
    start: Instant,
    timer: &'a Timer,
}

impl Drop for TimerGuard<'_> {
    fn drop(&mut self) {
        self.timer.stop(self.start);
    }
}

/// Logs frames per second with optional extra data.
pub struct FpsCounter {
    name: String,
    frames: u32,
    start: Instant,
}

impl FpsCounter {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            name: name.into(),
            frames: 0,
            start: Instant::now(),
        }
    }

    /// Advances the frame counter by 1 and logs FPS and `extra` data if one
    /// second has passed.
    pub fn tick_with<D: fmt::Display, I: IntoIterator<Item = D>>(&mut self, extra: I) {
        self.frames += 1;
        if self.start.elapsed() > Duration::from_secs(1) {
            let extra = extra
                .into_iter()
                .map(|item| item.to_string())
                .collect::<Vec<_>>();
            if extra.is_empty() {
                log::debug!("{}: {} FPS", self.name, self.frames);
            } else {
                log::debug!("{}: {} FPS ({})", self.name, self.frames, extra.join(", "));
            }

            self.frames = 0;
            self.start = Instant::now();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_resets_recorded_times() {
        let timer = Timer::new("op");
        timer.time(|| {});
        timer.time(|| {});
        let first = timer.to_string();
        assert!(first.starts_with("op: 2x"), "{first}");
        assert!(timer.to_string().starts_with("op: 0x"));
    }

    #[test]
    fn fps_counter_resets_after_logging_interval() {
        let timer = Timer::new("op");
        let mut fps = FpsCounter::new("test");

        fps.tick_with([&timer]);
        assert_eq!(fps.frames, 1);

        // Backdate the interval start so the next tick logs and resets.
        fps.start = Instant::now() - Duration::from_secs(2);
        fps.tick_with([&timer]);
        assert_eq!(fps.frames, 0);
    }
}
