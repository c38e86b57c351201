use std::time::Duration;
use std::time::Instant;

use chrono::DateTime;
use chrono::Utc;

pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;

    /// Calendar time, truncated to whole seconds.
    fn wall_time(&self) -> DateTime<Utc>;

    fn elapsed(&self, start: Instant) -> Duration {
        self.now().saturating_duration_since(start)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn wall_time(&self) -> DateTime<Utc> {
        deskpilot_protocol::timestamp::now()
    }
}
