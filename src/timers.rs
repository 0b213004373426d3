//! Owned timer handles for the scroll sequence.
//!
//! Dropping a gloo `Timeout`/`Interval` cancels it, so clearing this holder
//! (or dropping it with its component) stops every pending callback.

use gloo_timers::callback::{Interval, Timeout};

#[derive(Default)]
pub struct ScheduledTasks {
    timeout: Option<Timeout>,
    interval: Option<(u64, Interval)>,
}

impl ScheduledTasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces (and cancels) any pending timeout
    pub fn set_timeout(&mut self, timeout: Timeout) {
        self.timeout = Some(timeout);
    }

    /// Replaces (and cancels) any running interval
    pub fn set_interval(&mut self, generation: u64, interval: Interval) {
        self.interval = Some((generation, interval));
    }

    /// Stop the interval if it still belongs to `generation`.
    ///
    /// Must not run from inside the interval's own callback.
    pub fn release_interval(&mut self, generation: u64) {
        if matches!(self.interval, Some((g, _)) if g == generation) {
            self.interval = None;
        }
    }

    pub fn clear(&mut self) {
        self.timeout = None;
        self.interval = None;
    }
}
