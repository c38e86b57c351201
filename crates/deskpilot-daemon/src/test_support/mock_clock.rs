use std::sync::Mutex;
use std::time::Duration;
use std::time::Instant;

use chrono::DateTime;
use chrono::Utc;

use super::fixed_time;
use crate::ports::Clock;

/// Clock that only moves when told to.
pub struct MockClock {
    origin: Instant,
    offset: Mutex<Duration>,
}

impl MockClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.offset.lock().unwrap() += by;
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockClock {
    fn now(&self) -> Instant {
        self.origin + *self.offset.lock().unwrap()
    }

    fn wall_time(&self) -> DateTime<Utc> {
        let offset = *self.offset.lock().unwrap();
        fixed_time() + chrono::Duration::seconds(offset.as_secs() as i64)
    }
}
