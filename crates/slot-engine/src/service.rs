//! Scheduling facade: resolves hosts by username and runs the availability
//! computations against injected stores.

use std::sync::Arc;

use chrono::{NaiveDate, Timelike};
use chrono_tz::Tz;
use tracing::{debug, error, warn};

use crate::blocked::{self, MonthBlockSummary};
use crate::booking::{requester_local, Booking, BookingRequest};
use crate::clock::Clock;
use crate::error::{Result, SchedulingError};
use crate::host::{self, Host, HostId};
use crate::interval::{self, weekday_index, IntervalInput, WeeklyInterval};
use crate::resolver::{self, AvailabilityQuery, AvailabilityResult};
use crate::store::{BookingStore, HostDirectory, IntervalStore};

#[derive(Clone)]
pub struct SchedulingService {
    hosts: Arc<dyn HostDirectory>,
    intervals: Arc<dyn IntervalStore>,
    bookings: Arc<dyn BookingStore>,
    clock: Arc<dyn Clock>,
    server_tz: Tz,
}

impl SchedulingService {
    pub fn new(
        hosts: Arc<dyn HostDirectory>,
        intervals: Arc<dyn IntervalStore>,
        bookings: Arc<dyn BookingStore>,
        clock: Arc<dyn Clock>,
        server_tz: Tz,
    ) -> Self {
        Self {
            hosts,
            intervals,
            bookings,
            clock,
            server_tz,
        }
    }

    /// Build a service whose three stores are the same object.
    pub fn with_store<S>(store: Arc<S>, clock: Arc<dyn Clock>, server_tz: Tz) -> Self
    where
        S: HostDirectory + IntervalStore + BookingStore + 'static,
    {
        Self::new(store.clone(), store.clone(), store, clock, server_tz)
    }

    pub fn server_tz(&self) -> Tz {
        self.server_tz
    }

    pub async fn host(&self, username: &str) -> Result<Host> {
        self.hosts
            .find_by_username(username)
            .await
            .map_err(log_store_failure)?
            .ok_or_else(|| SchedulingError::host_not_found(username))
    }

    /// Slots of `reference_date` for a host, seen from a guest at `timezone_offset_minutes`.
    pub async fn resolve(
        &self,
        host_id: HostId,
        reference_date: NaiveDate,
        timezone_offset_minutes: i32,
    ) -> Result<AvailabilityResult> {
        let now = self.clock.now();
        let query = AvailabilityQuery {
            reference_date,
            timezone_offset_minutes,
        };

        resolver::validate_reference_date(reference_date)?;
        if resolver::is_past_day(reference_date, self.server_tz, now)? {
            debug!(%host_id, %reference_date, "reference date already elapsed");
            return Ok(AvailabilityResult::empty());
        }

        let weekday = weekday_index(reference_date);
        let Some(interval) = self
            .intervals
            .interval_for_weekday(host_id, weekday)
            .await
            .map_err(log_store_failure)?
        else {
            debug!(%host_id, weekday, "no interval configured");
            return Ok(AvailabilityResult::empty());
        };

        let (start, end) = resolver::blocking_window(&interval, reference_date, timezone_offset_minutes)?;
        let bookings = self
            .bookings
            .bookings_between(host_id, start, end)
            .await
            .map_err(log_store_failure)?;

        let result = resolver::resolve_slots(Some(&interval), &bookings, &query, self.server_tz, now)?;
        debug!(
            %host_id,
            %reference_date,
            offset = timezone_offset_minutes,
            possible = result.possible_slots.len(),
            available = result.available_slots.len(),
            "resolved availability"
        );
        Ok(result)
    }

    /// [`Self::resolve`] addressed by username.
    pub async fn availability(
        &self,
        username: &str,
        reference_date: NaiveDate,
        timezone_offset_minutes: i32,
    ) -> Result<AvailabilityResult> {
        let host = self.host(username).await?;
        self.resolve(host.id, reference_date, timezone_offset_minutes).await
    }

    pub async fn blocked_dates_for_month(&self, host_id: HostId, year: i32, month: u32) -> Result<MonthBlockSummary> {
        blocked::validate_month(year, month)?;

        let intervals = self
            .intervals
            .intervals_for_host(host_id)
            .await
            .map_err(log_store_failure)?;
        let bookings = self
            .bookings
            .bookings_in_month(host_id, year, month)
            .await
            .map_err(log_store_failure)?;

        let summary = blocked::summarize_month(&intervals, &bookings, year, month)?;
        debug!(
            %host_id,
            year,
            month,
            weekdays = ?summary.blocked_weekdays,
            days = ?summary.blocked_calendar_days,
            "summarized month"
        );
        Ok(summary)
    }

    /// [`Self::blocked_dates_for_month`] addressed by username.
    pub async fn blocked_dates(&self, username: &str, year: i32, month: u32) -> Result<MonthBlockSummary> {
        let host = self.host(username).await?;
        self.blocked_dates_for_month(host.id, year, month).await
    }

    pub async fn register_host(&self, username: &str, name: &str) -> Result<Host> {
        let username = username.trim();
        host::validate_username(username)?;
        let name = name.trim();
        if name.chars().count() < 3 {
            return Err(SchedulingError::validation("name must have at least 3 characters"));
        }

        match self.hosts.create_host(username, name).await {
            Ok(host) => {
                debug!(host_id = %host.id, username, "registered host");
                Ok(host)
            }
            Err(SchedulingError::Conflict(msg)) => {
                warn!(username, "username already taken");
                Err(SchedulingError::Conflict(msg))
            }
            Err(e) => Err(log_store_failure(e)),
        }
    }

    /// Replace a host's weekly configuration.
    pub async fn set_intervals(&self, username: &str, inputs: &[IntervalInput]) -> Result<Vec<WeeklyInterval>> {
        let host = self.host(username).await?;
        let intervals = interval::build_weekly_intervals(host.id, inputs)?;
        self.intervals
            .replace_intervals(host.id, intervals.clone())
            .await
            .map_err(log_store_failure)?;
        debug!(host_id = %host.id, days = intervals.len(), "weekly intervals replaced");
        Ok(intervals)
    }

    /// Book a slot the guest picked from [`Self::availability`].
    ///
    /// The guest-local time of `scheduled_at` must be a whole hour that is
    /// currently available. The store's uniqueness check closes the race between
    /// two guests booking the same slot.
    pub async fn book(&self, username: &str, request: BookingRequest) -> Result<Booking> {
        request.validate_guest()?;
        let host = self.host(username).await?;

        let offset = request.timezone_offset_minutes;
        let local = requester_local(request.scheduled_at, offset)?;
        if local.minute() != 0 || local.second() != 0 || local.nanosecond() != 0 {
            return Err(SchedulingError::validation(format!(
                "{} does not start on a whole hour",
                request.scheduled_at.to_rfc3339()
            )));
        }

        let availability = self.resolve(host.id, local.date(), offset).await?;
        if !availability.is_available(local.hour()) {
            warn!(host_id = %host.id, scheduled_at = %request.scheduled_at, "slot not available");
            return Err(SchedulingError::Conflict(format!(
                "{} is not an available slot",
                request.scheduled_at.to_rfc3339()
            )));
        }

        let booking = request.into_booking(host.id);
        match self.bookings.insert_booking(booking.clone()).await {
            Ok(()) => {
                debug!(host_id = %host.id, scheduled_at = %booking.scheduled_at, "booking confirmed");
                Ok(booking)
            }
            Err(SchedulingError::Conflict(msg)) => {
                warn!(host_id = %host.id, scheduled_at = %booking.scheduled_at, "lost booking race");
                Err(SchedulingError::Conflict(msg))
            }
            Err(e) => Err(log_store_failure(e)),
        }
    }
}

fn log_store_failure(err: SchedulingError) -> SchedulingError {
    if let SchedulingError::Store(ref detail) = err {
        error!(%detail, "store failure");
    }
    err
}
