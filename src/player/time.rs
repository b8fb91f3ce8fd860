use std::time::{Duration, Instant};

/// Rate limit for publishing playback position.
///
/// An update is admitted only when strictly more than `interval` has passed
/// since the last admitted one. The first update is always admitted.
#[derive(Debug, Clone)]
pub struct TimeThrottle {
    interval: Duration,
    last: Option<Instant>,
}

impl TimeThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn admit(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.saturating_duration_since(last) <= self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}
