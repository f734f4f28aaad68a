//! Ledger clock — every timestamp the store writes flows through here,
//! so the "today" window of the daily reports is testable.

use chrono::{Local, NaiveDateTime, Timelike};
use std::cell::Cell;

/// Canonical timestamp format: local time, second precision.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date prefix of [`DATE_TIME_FORMAT`], used for day-window queries.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub trait Clock {
    /// Current local wall time. Implementations truncate to whole seconds.
    fn now(&self) -> NaiveDateTime;
}

/// The real local clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        let now = Local::now().naive_local();
        now.with_nanosecond(0).unwrap_or(now)
    }
}

/// A settable clock for tests. Shared as `Rc<FixedClock>` so a test can
/// move time after handing the clock to a store.
pub struct FixedClock {
    now: Cell<NaiveDateTime>,
}

impl FixedClock {
    pub fn at(now: NaiveDateTime) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        self.now.set(now);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }
}
