//! Pluggable time source for temporal constraints.

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};

/// Supplies "now" to the temporal validators (`Past`, `Future`, ...).
///
/// The engine holds one clock for its lifetime; swapping in a [`FixedClock`]
/// makes temporal constraints deterministic under test.
pub trait Clock: Send + Sync + fmt::Debug {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// The wall clock. Default on every engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a configured instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Freezes the clock at the given instant.
    #[must_use]
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// Freezes the clock at the given UTC timestamp.
    #[must_use]
    pub fn at_utc(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Self {
        Self(
            Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
                .single()
                .unwrap_or_default(),
        )
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_is_frozen() {
        let clock = FixedClock::at_utc(2024, 6, 1, 12, 0, 0);
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now().to_rfc3339(), "2024-06-01T12:00:00+00:00");
    }
}
