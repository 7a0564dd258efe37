//! Wall-clock adapter.

use chrono::{DateTime, Utc};

use crate::domain::ports::Clock;

/// Production clock reading the system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
