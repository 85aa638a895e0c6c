//! Seed files: hosts with their weekly intervals and existing bookings, loaded
//! into the in-memory store.
//!
//! ```json
//! {
//!   "hosts": [{
//!     "username": "ada",
//!     "name": "Ada Lovelace",
//!     "intervals": [{ "weekday": 1, "startTime": "08:00", "endTime": "18:00" }],
//!     "bookings": [{
//!       "scheduledAt": "2026-03-16T10:00:00Z",
//!       "guestName": "Charles Babbage",
//!       "guestEmail": "charles@example.com"
//!     }]
//!   }]
//! }
//! ```

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Deserialize;
use slot_engine::store::BookingStore;
use slot_engine::{parse_time_of_day, Booking, Clock, InMemoryStore, IntervalInput, SchedulingService};
use tracing::info;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub hosts: Vec<SeedHost>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedHost {
    pub username: String,
    pub name: String,
    #[serde(default)]
    pub intervals: Vec<SeedInterval>,
    #[serde(default)]
    pub bookings: Vec<SeedBooking>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedInterval {
    pub weekday: u8,
    /// `HH:MM`
    pub start_time: String,
    /// `HH:MM`
    pub end_time: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedBooking {
    pub scheduled_at: DateTime<Utc>,
    pub guest_name: String,
    pub guest_email: String,
    #[serde(default)]
    pub note: Option<String>,
}

pub fn read_seed(path: &Path) -> Result<SeedFile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file: {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse seed file: {}", path.display()))
}

/// Register every host of `seed`, configure its intervals and store its bookings.
///
/// Bookings are inserted as already confirmed; they are not checked against
/// the current time or the configured intervals.
pub async fn apply_seed(seed: &SeedFile, service: &SchedulingService, store: &InMemoryStore) -> Result<()> {
    for entry in &seed.hosts {
        let host = service
            .register_host(&entry.username, &entry.name)
            .await
            .with_context(|| format!("Failed to register host '{}'", entry.username))?;

        if !entry.intervals.is_empty() {
            let inputs = entry
                .intervals
                .iter()
                .map(|i| -> slot_engine::error::Result<IntervalInput> {
                    Ok(IntervalInput {
                        weekday: i.weekday,
                        start_time_in_minutes: parse_time_of_day(&i.start_time)?,
                        end_time_in_minutes: parse_time_of_day(&i.end_time)?,
                    })
                })
                .collect::<slot_engine::error::Result<Vec<IntervalInput>>>()
                .with_context(|| format!("Invalid intervals for host '{}'", entry.username))?;
            service
                .set_intervals(&host.username, &inputs)
                .await
                .with_context(|| format!("Invalid intervals for host '{}'", entry.username))?;
        }

        for booking in &entry.bookings {
            store
                .insert_booking(Booking {
                    host_id: host.id,
                    scheduled_at: booking.scheduled_at,
                    guest_name: booking.guest_name.clone(),
                    guest_email: booking.guest_email.clone(),
                    note: booking.note.clone(),
                })
                .await
                .with_context(|| format!("Failed to seed booking for host '{}'", entry.username))?;
        }
    }

    info!(
        hosts = store.host_count(),
        bookings = store.booking_count(),
        "seed loaded"
    );
    Ok(())
}

/// Build an in-memory store and a service over it, seeded from `seed` if given.
pub async fn in_memory_service(
    seed: Option<&Path>,
    clock: Arc<dyn Clock>,
    server_tz: Tz,
) -> Result<(Arc<InMemoryStore>, SchedulingService)> {
    let store = Arc::new(InMemoryStore::new());
    let service = SchedulingService::with_store(store.clone(), clock, server_tz);

    if let Some(path) = seed {
        let seed = read_seed(path)?;
        apply_seed(&seed, &service, &store).await?;
    }

    Ok((store, service))
}
