//! HTTP API and command-line front end for `slot-engine`.
//!
//! ```text
//! GET  /users/{username}/availability?date=YYYY-MM-DD&timezoneOffset=N
//! GET  /users/{username}/blocked-dates?year=YYYY&month=M
//! POST /users
//! PUT  /users/{username}/time-intervals
//! POST /users/{username}/schedule
//! GET  /health
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod seed;
pub mod state;

pub use router::create_router;
pub use state::AppState;
