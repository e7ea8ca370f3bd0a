use std::time::{Duration, Instant};

/// Fixed-cadence polling clock.
///
/// Ticks that were missed while the event loop was busy are dropped rather
/// than replayed; each tick reads the current input state anyway.
#[derive(Debug, Clone)]
pub struct PollTimer {
    interval: Duration,
    next_due: Option<Instant>,
    stopped: bool,
}

impl PollTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
            stopped: false,
        }
    }

    /// Returns `true` at most once per interval. The first call fires
    /// immediately.
    pub fn due(&mut self, now: Instant) -> bool {
        if self.stopped {
            return false;
        }
        match self.next_due {
            Some(deadline) if now < deadline => false,
            _ => {
                self.next_due = Some(now + self.interval);
                true
            }
        }
    }

    /// Delay until the next tick should run.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.next_due
            .map(|deadline| deadline.saturating_duration_since(now))
            .unwrap_or_default()
    }

    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}
