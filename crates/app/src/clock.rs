//! Clock

use std::fmt::Debug;

use jiff::{Timestamp, Zoned, civil::Date};

/// Source of "today" and "now" for age calculation and order timestamps.
pub trait Clock: Debug + Send + Sync {
    /// The current calendar date in the shop's local time zone.
    fn today(&self) -> Date;

    /// The current instant.
    fn now(&self) -> Timestamp;
}

/// Wall clock backed by the system time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Date {
        Zoned::now().date()
    }

    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    today: Date,
    now: Timestamp,
}

impl FixedClock {
    /// Pin the clock to midnight UTC of `today`.
    #[must_use]
    pub fn on(today: Date) -> Self {
        let now = today
            .to_zoned(jiff::tz::TimeZone::UTC)
            .map_or(Timestamp::UNIX_EPOCH, |zoned| zoned.timestamp());

        Self { today, now }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> Date {
        self.today
    }

    fn now(&self) -> Timestamp {
        self.now
    }
}
