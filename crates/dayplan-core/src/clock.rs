use chrono::{DateTime, Local, NaiveDate, Utc};

/// Source of "today" and "now" for date-relative queries and validation.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// The caller's local calendar date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to one calendar date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
