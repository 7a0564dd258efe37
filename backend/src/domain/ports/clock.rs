//! Wall-clock port.
//!
//! Services never read system time directly; timestamps flow through this
//! port so lifecycle tests can pin the clock.

use chrono::{DateTime, Utc};

/// Source of the current instant for creation/update/acknowledgment stamps.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    /// Current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}
