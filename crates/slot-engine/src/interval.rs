//! Weekly recurring availability windows.
//!
//! A host has at most one [`WeeklyInterval`] per weekday. Weekdays are numbered
//! `0 = Sunday .. 6 = Saturday` and times are minutes after local midnight.

use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulingError};
use crate::host::HostId;

/// Minutes in a day; the latest allowed `end_minutes`.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Calendar years accepted for reference dates and month summaries.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 1..=9999;

/// Shortest window a host may configure for a weekday.
pub const MIN_INTERVAL_MINUTES: u32 = 60;

/// A recurring availability window on one weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyInterval {
    pub host_id: HostId,
    /// `0 = Sunday .. 6 = Saturday`.
    pub weekday: u8,
    pub start_minutes: u32,
    pub end_minutes: u32,
}

impl WeeklyInterval {
    /// Build an interval, enforcing `0 <= start < end <= 1440` and a weekday in `0..=6`.
    pub fn new(host_id: HostId, weekday: u8, start_minutes: u32, end_minutes: u32) -> Result<Self> {
        if weekday > 6 {
            return Err(SchedulingError::validation(format!(
                "weekday must be 0..=6, got {}",
                weekday
            )));
        }
        if start_minutes >= end_minutes || end_minutes > MINUTES_PER_DAY {
            return Err(SchedulingError::validation(format!(
                "interval {}..{} must satisfy 0 <= start < end <= {}",
                start_minutes, end_minutes, MINUTES_PER_DAY
            )));
        }
        Ok(Self {
            host_id,
            weekday,
            start_minutes,
            end_minutes,
        })
    }

    /// First bookable hour, `floor(start_minutes / 60)`.
    pub fn start_hour(&self) -> u32 {
        self.start_minutes / 60
    }

    /// Hour the window closes, `floor(end_minutes / 60)`. Not itself a slot.
    pub fn end_hour(&self) -> u32 {
        self.end_minutes / 60
    }
}

/// One entry of a host's weekly configuration, before it is bound to a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervalInput {
    pub weekday: u8,
    pub start_time_in_minutes: u32,
    pub end_time_in_minutes: u32,
}

/// Weekday index of a calendar date, `0 = Sunday`.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Parse a `"HH:MM"` time of day into minutes after midnight.
///
/// `"24:00"` is accepted as end-of-day (1440).
pub fn parse_time_of_day(value: &str) -> Result<u32> {
    let invalid = || SchedulingError::validation(format!("invalid time of day '{}', expected HH:MM", value));

    let (hours, minutes) = value.trim().split_once(':').ok_or_else(invalid)?;
    let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if !(1..=2).contains(&hours.len()) || minutes.len() != 2 || !digits(hours) || !digits(minutes) {
        return Err(invalid());
    }
    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
    if minutes >= 60 {
        return Err(invalid());
    }

    let total = hours * 60 + minutes;
    if total > MINUTES_PER_DAY {
        return Err(invalid());
    }
    Ok(total)
}

/// Validate a full weekly configuration and bind it to `host_id`.
///
/// The configuration replaces whatever the host had before, so it must name at
/// least one weekday, each weekday at most once, and every window must span at
/// least [`MIN_INTERVAL_MINUTES`]. The result is sorted by weekday.
pub fn build_weekly_intervals(host_id: HostId, inputs: &[IntervalInput]) -> Result<Vec<WeeklyInterval>> {
    if inputs.is_empty() {
        return Err(SchedulingError::validation(
            "at least one weekday must be available",
        ));
    }

    let mut seen = [false; 7];
    let mut intervals = Vec::with_capacity(inputs.len());

    for input in inputs {
        let interval = WeeklyInterval::new(
            host_id,
            input.weekday,
            input.start_time_in_minutes,
            input.end_time_in_minutes,
        )?;

        let slot = &mut seen[interval.weekday as usize];
        if *slot {
            return Err(SchedulingError::validation(format!(
                "weekday {} configured more than once",
                interval.weekday
            )));
        }
        *slot = true;

        if interval.end_minutes - interval.start_minutes < MIN_INTERVAL_MINUTES {
            return Err(SchedulingError::validation(format!(
                "weekday {} must end at least one hour after it starts",
                interval.weekday
            )));
        }

        intervals.push(interval);
    }

    intervals.sort_by_key(|i| i.weekday);
    Ok(intervals)
}
