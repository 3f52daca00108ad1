//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::domain::{PlanError, TripRequest};

use super::dto::*;
use super::state::AppState;

/// Prefix for versioned API routes.
pub const API_BASE_PATH: &str = "/the-lazy-traveler/api/1.0";

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/ping", get(ping))
        .route("/health", get(health))
        .route(&format!("{API_BASE_PATH}/lazy_jack"), post(plan_flight_path))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> &'static str {
    "Hello World!"
}

async fn ping() -> &'static str {
    "Pong!"
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Find the shortest itinerary for the posted trip.
async fn plan_flight_path(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<FlightPlanResponse>, AppError> {
    // Parse JSON manually so we can log the body on failure
    let request = TripRequest::from_json(&body).map_err(|e| {
        warn!(
            error = %e,
            body = %String::from_utf8_lossy(&body),
            "Error in binding request"
        );
        AppError::from(e)
    })?;

    info!(
        start = %request.trip_plan.start_city,
        end = %request.trip_plan.end_city,
        preferred_time = request.preferred_time,
        legs = request.schedules.len(),
        "Request received to find shortest flight path"
    );

    let itinerary = state.planner.plan(&request).await?;

    Ok(Json(FlightPlanResponse::from_itinerary(itinerary)))
}

/// Application error type.
///
/// Every planning failure is a client error; the body carries only the
/// stable code and public message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppError(pub PlanError);

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        AppError(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorResponse::from_error(&self.0);

        info!(code = body.code, error = %self.0, "Request failed");

        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}
