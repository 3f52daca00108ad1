//! Web layer for the flight planner.
//!
//! Provides the HTTP endpoint that plans itineraries, plus health checks.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{API_BASE_PATH, AppError, create_router};
pub use state::AppState;
