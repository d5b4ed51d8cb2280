//! Shared clock helpers for integration tests.

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

/// Reference instant used by integration tests.
pub fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 4, 9, 30, 0)
        .single()
        .expect("valid reference timestamp")
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Returns a clock pinned to [`reference_time`].
    pub fn reference() -> Self {
        Self(reference_time())
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}
