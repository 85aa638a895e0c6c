//! HTTP handlers. Each one validates its input, then delegates to
//! [`slot_engine::SchedulingService`].

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use super::dto::{
    AvailabilityParams, AvailabilityResponse, BlockedDatesParams, BlockedDatesResponse, HealthResponse,
    HostResponse, RegisterHostRequest, ScheduleRequest, ScheduleResponse, TimeIntervalsRequest,
    TimeIntervalsResponse,
};
use super::error::AppError;
use super::state::AppState;
use slot_engine::IntervalInput;

pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /users/{username}/availability?date=YYYY-MM-DD&timezoneOffset=N
pub async fn get_availability(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(params): Query<AvailabilityParams>,
) -> HandlerResult<AvailabilityResponse> {
    let (date, offset) = params.validate()?;
    debug!(%username, %date, offset, "availability requested");

    let result = state.scheduling.availability(&username, date, offset).await?;
    Ok(Json(result.into()))
}

/// GET /users/{username}/blocked-dates?year=YYYY&month=M
pub async fn get_blocked_dates(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(params): Query<BlockedDatesParams>,
) -> HandlerResult<BlockedDatesResponse> {
    let (year, month) = params.validate()?;
    debug!(%username, year, month, "blocked dates requested");

    let summary = state.scheduling.blocked_dates(&username, year, month).await?;
    Ok(Json(summary.into()))
}

/// POST /users
pub async fn register_host(
    State(state): State<AppState>,
    Json(request): Json<RegisterHostRequest>,
) -> Result<(StatusCode, Json<HostResponse>), AppError> {
    let host = state
        .scheduling
        .register_host(&request.user_name, &request.name)
        .await?;
    Ok((StatusCode::CREATED, Json(host.into())))
}

/// PUT /users/{username}/time-intervals
pub async fn put_time_intervals(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(request): Json<TimeIntervalsRequest>,
) -> HandlerResult<TimeIntervalsResponse> {
    let intervals = state
        .scheduling
        .set_intervals(&username, &request.intervals)
        .await?;

    Ok(Json(TimeIntervalsResponse {
        intervals: intervals
            .into_iter()
            .map(|i| IntervalInput {
                weekday: i.weekday,
                start_time_in_minutes: i.start_minutes,
                end_time_in_minutes: i.end_minutes,
            })
            .collect(),
    }))
}

/// POST /users/{username}/schedule
pub async fn create_schedule(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(request): Json<ScheduleRequest>,
) -> Result<(StatusCode, Json<ScheduleResponse>), AppError> {
    let booking = state
        .scheduling
        .book(&username, request.into_booking_request()?)
        .await?;
    Ok((StatusCode::CREATED, Json(booking.into())))
}
