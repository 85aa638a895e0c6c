//! Resolve which hourly slots of a date a guest can still book.
//!
//! The reference date is a naive calendar day. The guest's timezone arrives as
//! an offset in minutes using the "add to local time to reach UTC" convention
//! (positive west of UTC). That sign is relied on in two places:
//!
//! - the blocking window: the guest's wall-clock window `[start_hour, end_hour]`
//!   on the date is shifted by `+offset` to become UTC instants;
//! - the per-slot checks: a booking's guest-local time is `scheduled_at - offset`,
//!   and a slot is in the past when `date@h + offset < now`.
//!
//! Whether the whole day is over is decided in the *server's* timezone. Dates
//! outside [`SUPPORTED_YEARS`] are rejected before any arithmetic.

use chrono::{Datelike, DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::booking::{requester_instant, requester_local, Booking};
use crate::error::{Result, SchedulingError};
use crate::interval::{WeeklyInterval, SUPPORTED_YEARS};
use crate::slots::possible_slots;

/// A request for the slots of one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    pub reference_date: NaiveDate,
    /// Guest's offset in minutes, positive west of UTC.
    pub timezone_offset_minutes: i32,
}

/// Slots shown for a date, and the subset that can be booked.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AvailabilityResult {
    pub possible_slots: Vec<u32>,
    /// Subset of `possible_slots`, same order.
    pub available_slots: Vec<u32>,
}

impl AvailabilityResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_available(&self, hour: u32) -> bool {
        self.available_slots.contains(&hour)
    }
}

/// Reject reference dates outside [`SUPPORTED_YEARS`].
pub fn validate_reference_date(date: NaiveDate) -> Result<()> {
    if !SUPPORTED_YEARS.contains(&date.year()) {
        return Err(SchedulingError::out_of_range(date));
    }
    Ok(())
}

/// Local wall-clock time `hour:00` on `date`. `hour` may be 24 (next midnight).
pub fn at_hour(date: NaiveDate, hour: u32) -> Result<NaiveDateTime> {
    date.and_time(NaiveTime::MIN)
        .checked_add_signed(Duration::hours(hour as i64))
        .ok_or_else(|| SchedulingError::out_of_range(date))
}

/// Last millisecond of `date` in the server's timezone, as a UTC instant.
pub fn end_of_day_utc(date: NaiveDate, server_tz: Tz) -> Result<DateTime<Utc>> {
    let end_local = at_hour(date, 24)?
        .checked_sub_signed(Duration::milliseconds(1))
        .ok_or_else(|| SchedulingError::out_of_range(date))?;
    let offset = server_tz
        .offset_from_local_datetime(&end_local)
        .latest()
        .unwrap_or_else(|| server_tz.offset_from_utc_datetime(&end_local));
    end_local
        .checked_sub_signed(Duration::seconds(offset.fix().local_minus_utc() as i64))
        .map(|instant| instant.and_utc())
        .ok_or_else(|| SchedulingError::out_of_range(date))
}

/// True once `date` has fully elapsed in the server's timezone.
pub fn is_past_day(date: NaiveDate, server_tz: Tz, now: DateTime<Utc>) -> Result<bool> {
    Ok(end_of_day_utc(date, server_tz)? < now)
}

/// UTC range, inclusive at both ends, that holds every booking able to block a
/// slot of `interval` on `date` for a guest at `offset_minutes`.
pub fn blocking_window(
    interval: &WeeklyInterval,
    date: NaiveDate,
    offset_minutes: i32,
) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    Ok((
        requester_instant(at_hour(date, interval.start_hour())?, offset_minutes)?,
        requester_instant(at_hour(date, interval.end_hour())?, offset_minutes)?,
    ))
}

/// Compute the slots of `query.reference_date` given the interval configured for
/// its weekday and the host's bookings.
///
/// `bookings` may contain more than the blocking window; anything outside it is
/// ignored. Returns an empty result when the day is over or no interval is
/// configured, and a validation error when the date cannot be placed on the
/// UTC timeline.
pub fn resolve_slots(
    interval: Option<&WeeklyInterval>,
    bookings: &[Booking],
    query: &AvailabilityQuery,
    server_tz: Tz,
    now: DateTime<Utc>,
) -> Result<AvailabilityResult> {
    let date = query.reference_date;
    let offset = query.timezone_offset_minutes;

    validate_reference_date(date)?;
    if is_past_day(date, server_tz, now)? {
        return Ok(AvailabilityResult::empty());
    }

    let Some(interval) = interval else {
        return Ok(AvailabilityResult::empty());
    };

    let possible = possible_slots(Some(interval));
    let (window_start, window_end) = blocking_window(interval, date, offset)?;

    // Guest-local hours already taken on this date.
    let mut booked_hours = Vec::new();
    for booking in bookings
        .iter()
        .filter(|b| b.scheduled_at >= window_start && b.scheduled_at <= window_end)
    {
        let local = requester_local(booking.scheduled_at, offset)?;
        if local.date() == date {
            booked_hours.push(local.hour());
        }
    }

    let mut available = Vec::with_capacity(possible.len());
    for &hour in &possible {
        let starts_at = requester_instant(at_hour(date, hour)?, offset)?;
        if !booked_hours.contains(&hour) && starts_at >= now {
            available.push(hour);
        }
    }

    Ok(AvailabilityResult {
        possible_slots: possible,
        available_slots: available,
    })
}
