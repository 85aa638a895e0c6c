//! Storage seams for hosts, weekly intervals and bookings.
//!
//! The resolver and aggregator only read through these traits. Writes go
//! through [`crate::service::SchedulingService`], which validates first.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::booking::Booking;
use crate::error::Result;
use crate::host::{Host, HostId};
use crate::interval::WeeklyInterval;

#[async_trait]
pub trait HostDirectory: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<Host>>;

    /// Register a host. Fails with `Conflict` when the username is taken.
    async fn create_host(&self, username: &str, name: &str) -> Result<Host>;
}

#[async_trait]
pub trait IntervalStore: Send + Sync {
    /// All intervals of a host, ordered by weekday.
    async fn intervals_for_host(&self, host_id: HostId) -> Result<Vec<WeeklyInterval>>;

    async fn interval_for_weekday(&self, host_id: HostId, weekday: u8) -> Result<Option<WeeklyInterval>>;

    /// Replace the host's whole weekly configuration.
    async fn replace_intervals(&self, host_id: HostId, intervals: Vec<WeeklyInterval>) -> Result<()>;
}

#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Bookings with `start <= scheduled_at <= end`, ordered by `scheduled_at`.
    async fn bookings_between(
        &self,
        host_id: HostId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Booking>>;

    /// Bookings whose UTC date lies in `(year, month)`.
    async fn bookings_in_month(&self, host_id: HostId, year: i32, month: u32) -> Result<Vec<Booking>>;

    /// Store a booking. `(host_id, scheduled_at)` is unique; a second booking
    /// for the same instant fails with `Conflict`.
    async fn insert_booking(&self, booking: Booking) -> Result<()>;
}
