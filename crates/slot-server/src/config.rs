//! Command-line and environment configuration.
//!
//! Every flag can also be set through the environment variable named next to
//! it, which is how the server is configured when deployed.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use clap::Args;

/// Settings shared by the server and the offline queries.
#[derive(Debug, Clone, Args)]
pub struct EngineArgs {
    /// IANA timezone the server uses to decide when a day is over
    #[arg(long, env = "SERVER_TZ", default_value = "UTC", value_parser = parse_timezone)]
    pub server_tz: Tz,

    /// JSON file of hosts, intervals and bookings loaded at startup
    #[arg(long, env = "SEED_FILE")]
    pub seed: Option<PathBuf>,
}

/// Settings of `slots serve`.
#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Interface to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3333)]
    pub port: u16,

    #[command(flatten)]
    pub engine: EngineArgs,
}

impl ServeArgs {
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid bind address: {}:{}", self.host, self.port))
    }
}

pub fn parse_timezone(value: &str) -> Result<Tz, String> {
    value
        .parse()
        .map_err(|_| format!("unknown IANA timezone '{}'", value))
}

pub fn parse_instant(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 instant, got '{}': {}", value, e))
}
