//! Confirmed bookings and the request a guest submits to create one.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulingError};
use crate::host::HostId;

/// A confirmed booking. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub host_id: HostId,
    pub scheduled_at: DateTime<Utc>,
    pub guest_name: String,
    pub guest_email: String,
    #[serde(default)]
    pub note: Option<String>,
}

/// What a guest submits when confirming a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub scheduled_at: DateTime<Utc>,
    /// Guest's offset in minutes, positive west of UTC.
    pub timezone_offset_minutes: i32,
    pub guest_name: String,
    pub guest_email: String,
    pub note: Option<String>,
}

impl BookingRequest {
    /// Check the guest contact fields.
    pub fn validate_guest(&self) -> Result<()> {
        if self.guest_name.trim().chars().count() < 3 {
            return Err(SchedulingError::validation(
                "guest name must have at least 3 characters",
            ));
        }
        let email = self.guest_email.trim();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(SchedulingError::validation(format!(
                "invalid guest email '{}'",
                email
            ))),
        }
    }

    pub fn into_booking(self, host_id: HostId) -> Booking {
        Booking {
            host_id,
            scheduled_at: self.scheduled_at,
            guest_name: self.guest_name.trim().to_string(),
            guest_email: self.guest_email.trim().to_string(),
            note: self.note.filter(|n| !n.trim().is_empty()),
        }
    }
}

/// Wall-clock time of a UTC instant for someone at `offset_minutes`.
///
/// Offsets follow the "minutes to add to local time to reach UTC" convention,
/// so local = UTC - offset.
pub fn requester_local(instant: DateTime<Utc>, offset_minutes: i32) -> Result<NaiveDateTime> {
    instant
        .naive_utc()
        .checked_sub_signed(Duration::minutes(offset_minutes as i64))
        .ok_or_else(|| SchedulingError::out_of_range(instant.to_rfc3339()))
}

/// UTC instant of a requester's wall-clock time; the inverse of [`requester_local`].
pub fn requester_instant(local: NaiveDateTime, offset_minutes: i32) -> Result<DateTime<Utc>> {
    local
        .checked_add_signed(Duration::minutes(offset_minutes as i64))
        .map(|instant| instant.and_utc())
        .ok_or_else(|| SchedulingError::out_of_range(local))
}
