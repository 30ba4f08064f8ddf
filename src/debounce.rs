//! Rate limiting for change notifications
//!
//! Change sources fire in rapid bursts; the engine expects one coalesced call
//! per burst. [`Debouncer`] is a passive state machine the owning layer
//! drives: `signal` on every raw notification, `poll` from a periodic tick.
//! The owner keeps the instance for its whole lifetime so teardown can cancel
//! pending work through the same handle that scheduled it.

use std::time::Instant;

/// Source of the current time in milliseconds.
///
/// Injected so coalescing behavior is testable and so the WASM bridge can
/// supply the host's clock.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Monotonic clock anchored at construction time.
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Coalesces a burst of signals into a single firing.
///
/// Trailing-edge policy fires once from `poll` after a quiet period of
/// `delay_ms`. Leading-edge policy fires from the first `signal` of a burst
/// and stays quiet until the burst ends.
#[derive(Debug)]
pub struct Debouncer {
    delay_ms: f64,
    leading: bool,
    deadline: Option<f64>,
}

impl Debouncer {
    pub fn new(delay_ms: f64, leading: bool) -> Self {
        Self {
            delay_ms,
            leading,
            deadline: None,
        }
    }

    /// Record a raw notification. Returns true when the leading edge fires.
    pub fn signal(&mut self, now_ms: f64) -> bool {
        let fire = self.leading && self.deadline.is_none();
        self.deadline = Some(now_ms + self.delay_ms);
        fire
    }

    /// Advance time. Returns true when the trailing edge fires.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                !self.leading
            }
            _ => false,
        }
    }

    /// Drop any pending firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a burst is in progress.
    pub fn pending(&self) -> bool {
        self.deadline.is_some()
    }
}
