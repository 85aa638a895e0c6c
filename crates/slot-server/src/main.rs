//! `slots`: serve the scheduling API or query a seed file offline.
//!
//! ## Usage
//!
//! ```sh
//! # Run the HTTP API on port 3333 with hosts from a seed file
//! slots serve --seed hosts.json
//!
//! # Same, configured from the environment
//! PORT=8080 SERVER_TZ=America/Sao_Paulo SEED_FILE=hosts.json slots serve
//!
//! # Availability of a host for a date, as seen from UTC-3
//! slots availability --seed hosts.json --user ada --date 2026-03-16 --timezone-offset 180
//!
//! # Blocked weekdays and full days of a month
//! slots blocked-dates --seed hosts.json --user ada --year 2026 --month 3
//! ```
//!
//! Offline queries print the same JSON bodies as the HTTP endpoints. Pass
//! `--now` to evaluate them at a fixed instant.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use slot_engine::{Clock, FixedClock, SystemClock};
use slot_server::config::{parse_instant, EngineArgs, ServeArgs};
use slot_server::dto::{AvailabilityResponse, BlockedDatesResponse};
use slot_server::seed::in_memory_service;
use slot_server::{create_router, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Scheduling-link availability server and offline queries"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve(ServeArgs),
    /// Print the possible and available hours of a host on one date
    Availability {
        /// Host username
        #[arg(long)]
        user: String,
        /// Calendar date, YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,
        /// Guest offset in minutes, positive west of UTC
        #[arg(long, allow_negative_numbers = true)]
        timezone_offset: i32,
        /// Evaluate at this RFC 3339 instant instead of the current time
        #[arg(long, value_parser = parse_instant)]
        now: Option<DateTime<Utc>>,
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Print the blocked weekdays and full days of a month
    BlockedDates {
        /// Host username
        #[arg(long)]
        user: String,
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        /// Evaluate at this RFC 3339 instant instead of the current time
        #[arg(long, value_parser = parse_instant)]
        now: Option<DateTime<Utc>>,
        #[command(flatten)]
        engine: EngineArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => serve(args).await?,
        Commands::Availability {
            user,
            date,
            timezone_offset,
            now,
            engine,
        } => {
            let (_, service) = in_memory_service(engine.seed.as_deref(), clock(now), engine.server_tz).await?;
            let result = service
                .availability(&user, date, timezone_offset)
                .await
                .with_context(|| format!("Failed to resolve availability for '{}'", user))?;
            print_json(&AvailabilityResponse::from(result))?;
        }
        Commands::BlockedDates {
            user,
            year,
            month,
            now,
            engine,
        } => {
            let (_, service) = in_memory_service(engine.seed.as_deref(), clock(now), engine.server_tz).await?;
            let summary = service
                .blocked_dates(&user, year, month)
                .await
                .with_context(|| format!("Failed to compute blocked dates for '{}'", user))?;
            print_json(&BlockedDatesResponse::from(summary))?;
        }
    }

    Ok(())
}

async fn serve(args: ServeArgs) -> Result<()> {
    let addr = args.bind_addr()?;
    let (store, service) =
        in_memory_service(args.engine.seed.as_deref(), Arc::new(SystemClock), args.engine.server_tz).await?;
    info!(
        server_tz = %args.engine.server_tz,
        hosts = store.host_count(),
        "store ready"
    );

    let app = create_router(AppState::new(service));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(%addr, "listening");

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

fn clock(now: Option<DateTime<Utc>>) -> Arc<dyn Clock> {
    match now {
        Some(instant) => Arc::new(FixedClock(instant)),
        None => Arc::new(SystemClock),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}
