//! Request and response bodies of the HTTP API.
//!
//! Query parameters arrive as optional strings so that a missing or malformed
//! value is reported by [`AppError::BadRequest`] with a useful message before
//! anything reaches the engine.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use slot_engine::interval::SUPPORTED_YEARS;
use slot_engine::resolver::validate_reference_date;
use slot_engine::{AvailabilityResult, Booking, BookingRequest, Host, IntervalInput, MonthBlockSummary};

use crate::error::AppError;

/// Largest accepted `|timezoneOffset|`, in minutes.
pub const MAX_OFFSET_MINUTES: i32 = 24 * 60;

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, AppError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("{} not provided", name)))
}

fn parse_offset(raw: &str) -> Result<i32, AppError> {
    let offset: i32 = raw
        .parse()
        .map_err(|_| AppError::BadRequest(format!("timezoneOffset must be whole minutes, got '{}'", raw)))?;
    if offset.abs() > MAX_OFFSET_MINUTES {
        return Err(AppError::BadRequest(format!(
            "timezoneOffset out of range: {}",
            offset
        )));
    }
    Ok(offset)
}

// =============================================================================
// Availability
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityParams {
    pub date: Option<String>,
    pub timezone_offset: Option<String>,
}

impl AvailabilityParams {
    /// Reference date and offset in minutes.
    pub fn validate(&self) -> Result<(NaiveDate, i32), AppError> {
        let date = required(&self.date, "date")?;
        let offset = required(&self.timezone_offset, "timezoneOffset")?;

        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| AppError::BadRequest(format!("date must be YYYY-MM-DD, got '{}'", date)))?;
        validate_reference_date(date)?;
        Ok((date, parse_offset(offset)?))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub possible_times: Vec<u32>,
    pub available_times: Vec<u32>,
}

impl From<AvailabilityResult> for AvailabilityResponse {
    fn from(result: AvailabilityResult) -> Self {
        Self {
            possible_times: result.possible_slots,
            available_times: result.available_slots,
        }
    }
}

// =============================================================================
// Blocked dates
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockedDatesParams {
    pub year: Option<String>,
    pub month: Option<String>,
}

impl BlockedDatesParams {
    pub fn validate(&self) -> Result<(i32, u32), AppError> {
        let year = required(&self.year, "year")?;
        let month = required(&self.month, "month")?;

        let year: i32 = year
            .parse()
            .map_err(|_| AppError::BadRequest(format!("year must be an integer, got '{}'", year)))?;
        let month: u32 = month
            .parse()
            .map_err(|_| AppError::BadRequest(format!("month must be an integer, got '{}'", month)))?;
        Ok((year, month))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedDatesResponse {
    pub blocked_week_days: Vec<u8>,
    pub blocked_dates: Vec<u32>,
}

impl From<MonthBlockSummary> for BlockedDatesResponse {
    fn from(summary: MonthBlockSummary) -> Self {
        Self {
            blocked_week_days: summary.blocked_weekdays,
            blocked_dates: summary.blocked_calendar_days,
        }
    }
}

// =============================================================================
// Hosts and intervals
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterHostRequest {
    pub name: String,
    pub user_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostResponse {
    pub id: u64,
    pub name: String,
    pub user_name: String,
}

impl From<Host> for HostResponse {
    fn from(host: Host) -> Self {
        Self {
            id: host.id.0,
            name: host.name,
            user_name: host.username,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeIntervalsRequest {
    pub intervals: Vec<IntervalInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeIntervalsResponse {
    pub intervals: Vec<IntervalInput>,
}

// =============================================================================
// Scheduling
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub scheduled_at: DateTime<Utc>,
    pub timezone_offset: i32,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub note: Option<String>,
}

impl ScheduleRequest {
    pub fn into_booking_request(self) -> Result<BookingRequest, AppError> {
        if self.timezone_offset.abs() > MAX_OFFSET_MINUTES {
            return Err(AppError::BadRequest(format!(
                "timezoneOffset out of range: {}",
                self.timezone_offset
            )));
        }
        if !SUPPORTED_YEARS.contains(&self.scheduled_at.year()) {
            return Err(AppError::BadRequest(format!(
                "scheduledAt out of range: {}",
                self.scheduled_at.to_rfc3339()
            )));
        }
        Ok(BookingRequest {
            scheduled_at: self.scheduled_at,
            timezone_offset_minutes: self.timezone_offset,
            guest_name: self.name,
            guest_email: self.email,
            note: self.note,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    pub scheduled_at: DateTime<Utc>,
    pub name: String,
    pub email: String,
    pub note: Option<String>,
}

impl From<Booking> for ScheduleResponse {
    fn from(booking: Booking) -> Self {
        Self {
            scheduled_at: booking.scheduled_at,
            name: booking.guest_name,
            email: booking.guest_email,
            note: booking.note,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
