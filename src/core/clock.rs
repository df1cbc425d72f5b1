use chrono::{
    Local,
    NaiveDate,
};

pub trait Clock {
    /// Today's local calendar date.
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same day. Used by tests and for replaying state.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// `YYYYMMDD`, the key format of `dailyProgress`.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}
