//! Month-level summary of days a date picker should gray out.
//!
//! A weekday without any interval is always blocked. A calendar day is blocked
//! once its bookings fill the capacity of the interval they are grouped under.
//!
//! Bookings are grouped by their UTC day of month, and each group is matched to
//! the interval of the weekday *after* that UTC date. A group whose shifted
//! weekday has no interval has no capacity and never blocks its day.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration};
use serde::{Deserialize, Serialize};

use crate::booking::Booking;
use crate::error::{Result, SchedulingError};
use crate::interval::{weekday_index, WeeklyInterval, SUPPORTED_YEARS};
use crate::slots::slot_count;

/// Blocked weekdays and blocked days of one month.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MonthBlockSummary {
    /// Ascending weekday numbers, `0 = Sunday`.
    pub blocked_weekdays: Vec<u8>,
    /// Ascending days of month.
    pub blocked_calendar_days: Vec<u32>,
}

/// Weekdays `0..=6` for which no interval is configured.
pub fn blocked_weekdays(intervals: &[WeeklyInterval]) -> Vec<u8> {
    (0u8..=6)
        .filter(|weekday| !intervals.iter().any(|i| i.weekday == *weekday))
        .collect()
}

pub fn validate_month(year: i32, month: u32) -> Result<()> {
    if !(1..=12).contains(&month) {
        return Err(SchedulingError::validation(format!(
            "month must be 1..=12, got {}",
            month
        )));
    }
    if !SUPPORTED_YEARS.contains(&year) {
        return Err(SchedulingError::validation(format!(
            "year out of range: {}",
            year
        )));
    }
    Ok(())
}

#[derive(Debug, Default)]
struct DayGroup {
    bookings: u32,
    capacity: Option<u32>,
}

/// Summarize `(year, month)` for one host.
///
/// `bookings` may span more than the month; only those whose UTC date falls in
/// it are counted.
pub fn summarize_month(
    intervals: &[WeeklyInterval],
    bookings: &[Booking],
    year: i32,
    month: u32,
) -> Result<MonthBlockSummary> {
    validate_month(year, month)?;

    let capacity_for = |weekday: u8| {
        intervals
            .iter()
            .find(|i| i.weekday == weekday)
            .map(slot_count)
    };

    let mut groups: BTreeMap<u32, DayGroup> = BTreeMap::new();
    for booking in bookings {
        let date = booking.scheduled_at.date_naive();
        if date.year() != year || date.month() != month {
            continue;
        }

        let group = groups.entry(date.day()).or_default();
        group.bookings += 1;
        if group.capacity.is_none() {
            group.capacity = capacity_for(weekday_index(date + Duration::days(1)));
        }
    }

    let blocked_calendar_days = groups
        .into_iter()
        .filter_map(|(day, group)| match group.capacity {
            Some(capacity) if group.bookings >= capacity => Some(day),
            _ => None,
        })
        .collect();

    Ok(MonthBlockSummary {
        blocked_weekdays: blocked_weekdays(intervals),
        blocked_calendar_days,
    })
}
