/// Source of the current civil date
///
/// Everything that needs "today" takes it from a Clock so tests can pin the
/// date instead of depending on when they run.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

/// Provides the current civil date
pub trait Clock {
    fn today(&self) -> NaiveDate;

    /// Local wall-clock time, used for reminder scheduling
    fn now(&self) -> NaiveDateTime {
        self.today().and_time(NaiveTime::default())
    }
}

/// Reads the local wall clock
///
/// The routine is a morning habit, so the user's local date is the one
/// that matters, not UTC.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self(today)
    }

    /// Move the clock forward by whole days
    pub fn advance(&mut self, days: i64) {
        self.0 = self.0 + chrono::Duration::days(days);
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
