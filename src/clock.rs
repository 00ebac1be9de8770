use chrono::{DateTime, Local, NaiveDate, Utc};

/// Time source for mutation timestamps and "this month" aggregation.
pub(crate) trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Calendar date used to decide which month is "current".
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall clock. Timestamps are UTC, but "today" follows the local timezone
/// so the current month matches what the user sees on their calendar.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
