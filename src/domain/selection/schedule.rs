//! Clock-driven scheduling helpers
//!
//! Callers pass `now` explicitly; nothing here reads the clock.

use std::time::{Duration, Instant};

/// Holds the latest value until it has been quiet for `window`.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Replaces any pending value and restarts the quiet window.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// The pending value, once `window` has elapsed since the last push.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let settled = self
            .pending
            .as_ref()
            .is_some_and(|(_, since)| now.saturating_duration_since(*since) >= self.window);
        if settled {
            self.pending.take().map(|(value, _)| value)
        } else {
            None
        }
    }
}

/// Becomes ready on the first tick after construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct NextTick {
    ready: bool,
}

impl NextTick {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self) {
        self.ready = true;
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }
}
