//! Calendar clock
//!
//! Remaining-days arithmetic works on calendar dates only. The clock decides
//! which calendar "today" is read from, and lets tests pin it.

use chrono::{Local, NaiveDate, Utc};

/// Source of the current calendar date
pub trait Clock: Send + Sync {
    /// Today's date, with the time of day stripped
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the system time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemClock {
    /// Host's local calendar
    Local,
    /// UTC calendar
    Utc,
}

impl SystemClock {
    /// Builds a clock from the `application.calendar` setting
    pub fn from_setting(calendar: &str) -> Self {
        match calendar {
            "utc" => SystemClock::Utc,
            _ => SystemClock::Local,
        }
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        match self {
            SystemClock::Local => Local::now().date_naive(),
            SystemClock::Utc => Utc::now().date_naive(),
        }
    }
}

/// Clock pinned to a single date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
