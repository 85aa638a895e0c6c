//! # slot-engine
//!
//! Availability computation for scheduling links.
//!
//! A host publishes one recurring window per weekday. Guests ask for a
//! calendar date from their own timezone and get back the hourly slots the
//! host offers that day, together with the subset that is still bookable once
//! existing bookings and the current time are taken into account.
//!
//! ## Modules
//!
//! - [`interval`]: weekly windows, `HH:MM` parsing, configuration checks
//! - [`booking`]: bookings and guest-local time conversion
//! - [`slots`]: hourly candidate slots of a window
//! - [`resolver`]: bookable slots for a date and timezone offset
//! - [`blocked`]: blocked weekdays and full days of a month
//! - [`store`]: storage traits; [`memory`] implements them in memory
//! - [`service`]: facade wiring stores, clock and server timezone
//! - [`error`]: Error types

pub mod blocked;
pub mod booking;
pub mod clock;
pub mod error;
pub mod host;
pub mod interval;
pub mod memory;
pub mod resolver;
pub mod service;
pub mod slots;
pub mod store;

pub use blocked::{summarize_month, MonthBlockSummary};
pub use booking::{Booking, BookingRequest};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::SchedulingError;
pub use host::{Host, HostId};
pub use interval::{parse_time_of_day, IntervalInput, WeeklyInterval};
pub use memory::InMemoryStore;
pub use resolver::{resolve_slots, AvailabilityQuery, AvailabilityResult};
pub use service::SchedulingService;
pub use slots::possible_slots;
