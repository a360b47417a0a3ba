//! Fixed-interval frame gate
//!
//! The host calls back once per display refresh. A callback only runs a tick
//! when the target interval has elapsed since the last executed tick, and
//! that tick gets the wall-clock time since the last executed one.

use crate::consts::MAX_FRAME_DT;

/// Slack for display callbacks that land just short of the interval (ms)
const FRAME_TOLERANCE: f64 = 1.0;

#[derive(Debug, Clone)]
pub struct FrameClock {
    interval: f64,
    last_tick: Option<f64>,
}

impl FrameClock {
    /// `interval` in milliseconds
    pub fn new(interval: f32) -> Self {
        Self {
            interval: interval as f64,
            last_tick: None,
        }
    }

    /// Elapsed ms for a tick to run now, or `None` if it is too early.
    ///
    /// The very first callback only arms the clock.
    pub fn poll(&mut self, now: f64) -> Option<f32> {
        let Some(last) = self.last_tick else {
            self.last_tick = Some(now);
            return None;
        };
        let elapsed = now - last;
        if elapsed < self.interval - FRAME_TOLERANCE {
            return None;
        }
        self.last_tick = Some(now);
        Some((elapsed as f32).min(MAX_FRAME_DT))
    }

    /// Forget the last tick (after a pause or session restart)
    pub fn reset(&mut self) {
        self.last_tick = None;
    }
}
