//! Remaining-days calculator and treatment status
//!
//! `remaining = max(numberOfDays - elapsed, 0)` where `elapsed` is the number
//! of whole calendar days between the start date and today. A treatment that
//! starts today has `elapsed = 0`, so day one still counts as remaining.
//!
//! This is the only formula the crate uses for treatment progress. Because it
//! is clamped at zero, a finished treatment reads as completed and there is no
//! overdue state.

use crate::domain::assignment::TreatmentTiming;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Derived progress of a treatment, never persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreatmentStatus {
    /// At least one day remains
    Active,
    /// No days remain
    Completed,
}

impl TreatmentStatus {
    /// Classifies a remaining-days value
    pub fn from_remaining(remaining_days: i64) -> Self {
        if remaining_days > 0 {
            TreatmentStatus::Active
        } else {
            TreatmentStatus::Completed
        }
    }
}

impl fmt::Display for TreatmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreatmentStatus::Active => f.write_str("active"),
            TreatmentStatus::Completed => f.write_str("completed"),
        }
    }
}

/// Whole days from `start_date` to `today`; negative when the start is ahead
pub fn elapsed_days(today: NaiveDate, start_date: NaiveDate) -> i64 {
    (today - start_date).num_days()
}

/// Days of treatment left on `today`, floored at zero
///
/// # Examples
///
/// ```
/// use medtrack::core::remaining::remaining_days;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
/// assert_eq!(remaining_days(start, start, 7), 7);
///
/// let later = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
/// assert_eq!(remaining_days(later, start, 3), 0);
/// ```
pub fn remaining_days(today: NaiveDate, start_date: NaiveDate, number_of_days: u32) -> i64 {
    let remaining = i64::from(number_of_days) - elapsed_days(today, start_date);
    remaining.max(0)
}

/// Remaining days and status of one treatment on a given day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreatmentProgress {
    pub remaining_days: i64,
    pub status: TreatmentStatus,
}

impl TreatmentProgress {
    /// Evaluates a treatment's timing against `today`
    pub fn evaluate(today: NaiveDate, timing: &TreatmentTiming) -> Self {
        let remaining_days = remaining_days(today, timing.start_date(), timing.number_of_days());
        Self {
            remaining_days,
            status: TreatmentStatus::from_remaining(remaining_days),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_started_today_counts_full_duration() {
        let today = day(2025, 3, 10);
        assert_eq!(remaining_days(today, today, 7), 7);
    }

    #[test]
    fn test_completed_treatment_is_zero() {
        let today = day(2025, 3, 10);
        let start = today - Duration::days(4);
        assert_eq!(remaining_days(today, start, 3), 0);
    }

    #[test]
    fn test_last_day_boundary() {
        let start = day(2025, 3, 1);
        assert_eq!(remaining_days(day(2025, 3, 3), start, 3), 1);
        assert_eq!(remaining_days(day(2025, 3, 4), start, 3), 0);
    }

    #[test]
    fn test_future_start_adds_days_ahead() {
        let today = day(2025, 3, 1);
        assert_eq!(remaining_days(today, day(2025, 3, 3), 5), 7);
    }

    #[test]
    fn test_crosses_month_and_leap_day() {
        let start = day(2024, 2, 27);
        assert_eq!(elapsed_days(day(2024, 3, 1), start), 3);
        assert_eq!(remaining_days(day(2024, 3, 1), start, 10), 7);
    }

    #[test]
    fn test_monotonic_and_never_negative() {
        let start = day(2025, 1, 1);
        let mut previous = i64::MAX;
        for offset in 0..40 {
            let today = start + Duration::days(offset);
            let remaining = remaining_days(today, start, 14);
            assert!(remaining >= 0);
            assert!(remaining <= previous);
            if offset >= 14 {
                assert_eq!(remaining, 0);
            }
            previous = remaining;
        }
    }

    #[test]
    fn test_status_classification() {
        assert_eq!(TreatmentStatus::from_remaining(3), TreatmentStatus::Active);
        assert_eq!(TreatmentStatus::from_remaining(0), TreatmentStatus::Completed);
        assert_eq!(TreatmentStatus::Completed.to_string(), "completed");
    }

    #[test]
    fn test_progress_evaluate() {
        let timing = TreatmentTiming::new(day(2025, 5, 1), 10).unwrap();
        let progress = TreatmentProgress::evaluate(day(2025, 5, 4), &timing);
        assert_eq!(progress.remaining_days, 7);
        assert_eq!(progress.status, TreatmentStatus::Active);
    }
}
