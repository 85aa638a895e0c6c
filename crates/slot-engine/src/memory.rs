//! In-memory implementation of every store trait.
//!
//! Reads take a shared lock; writes take the exclusive lock, which also
//! serializes booking inserts so the `(host, scheduled_at)` uniqueness check and
//! the insert happen atomically.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use parking_lot::RwLock;

use crate::booking::Booking;
use crate::error::{Result, SchedulingError};
use crate::host::{Host, HostId};
use crate::interval::WeeklyInterval;
use crate::store::{BookingStore, HostDirectory, IntervalStore};

#[derive(Debug, Default)]
struct Tables {
    next_host_id: u64,
    hosts: BTreeMap<HostId, Host>,
    usernames: HashMap<String, HostId>,
    intervals: BTreeMap<(HostId, u8), WeeklyInterval>,
    bookings: BTreeMap<(HostId, DateTime<Utc>), Booking>,
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn host_count(&self) -> usize {
        self.tables.read().hosts.len()
    }

    pub fn booking_count(&self) -> usize {
        self.tables.read().bookings.len()
    }
}

fn month_start(year: i32, month: u32) -> Result<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| SchedulingError::validation(format!("invalid month {}-{}", year, month)))
}

#[async_trait]
impl HostDirectory for InMemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Host>> {
        let tables = self.tables.read();
        Ok(tables
            .usernames
            .get(username)
            .and_then(|id| tables.hosts.get(id))
            .cloned())
    }

    async fn create_host(&self, username: &str, name: &str) -> Result<Host> {
        let mut tables = self.tables.write();
        if tables.usernames.contains_key(username) {
            return Err(SchedulingError::Conflict(format!(
                "username '{}' already taken",
                username
            )));
        }

        tables.next_host_id += 1;
        let host = Host {
            id: HostId(tables.next_host_id),
            username: username.to_string(),
            name: name.to_string(),
        };
        tables.usernames.insert(host.username.clone(), host.id);
        tables.hosts.insert(host.id, host.clone());
        Ok(host)
    }
}

#[async_trait]
impl IntervalStore for InMemoryStore {
    async fn intervals_for_host(&self, host_id: HostId) -> Result<Vec<WeeklyInterval>> {
        let tables = self.tables.read();
        Ok(tables
            .intervals
            .range((host_id, 0)..=(host_id, u8::MAX))
            .map(|(_, interval)| *interval)
            .collect())
    }

    async fn interval_for_weekday(&self, host_id: HostId, weekday: u8) -> Result<Option<WeeklyInterval>> {
        Ok(self.tables.read().intervals.get(&(host_id, weekday)).copied())
    }

    async fn replace_intervals(&self, host_id: HostId, intervals: Vec<WeeklyInterval>) -> Result<()> {
        let mut tables = self.tables.write();
        if !tables.hosts.contains_key(&host_id) {
            return Err(SchedulingError::NotFound(format!("host id {}", host_id)));
        }

        tables.intervals.retain(|(owner, _), _| *owner != host_id);
        for interval in intervals {
            tables.intervals.insert((host_id, interval.weekday), WeeklyInterval { host_id, ..interval });
        }
        Ok(())
    }
}

#[async_trait]
impl BookingStore for InMemoryStore {
    async fn bookings_between(
        &self,
        host_id: HostId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Booking>> {
        if start > end {
            return Ok(Vec::new());
        }
        let tables = self.tables.read();
        Ok(tables
            .bookings
            .range((host_id, start)..=(host_id, end))
            .map(|(_, booking)| booking.clone())
            .collect())
    }

    async fn bookings_in_month(&self, host_id: HostId, year: i32, month: u32) -> Result<Vec<Booking>> {
        let start = month_start(year, month)?;
        let end = if month == 12 {
            month_start(year + 1, 1)?
        } else {
            month_start(year, month + 1)?
        };

        let tables = self.tables.read();
        Ok(tables
            .bookings
            .range((host_id, start)..(host_id, end))
            .map(|(_, booking)| booking.clone())
            .collect())
    }

    async fn insert_booking(&self, booking: Booking) -> Result<()> {
        let mut tables = self.tables.write();
        if !tables.hosts.contains_key(&booking.host_id) {
            return Err(SchedulingError::NotFound(format!("host id {}", booking.host_id)));
        }

        let key = (booking.host_id, booking.scheduled_at);
        if tables.bookings.contains_key(&key) {
            return Err(SchedulingError::Conflict(format!(
                "slot {} is already booked",
                booking.scheduled_at.to_rfc3339()
            )));
        }
        tables.bookings.insert(key, booking);
        Ok(())
    }
}
