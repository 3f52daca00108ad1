//! Data transfer objects for web responses.
//!
//! The request body deserialises straight into
//! [`TripRequest`](crate::domain::TripRequest); only responses need their own
//! shapes.

use serde::{Deserialize, Serialize};

use crate::domain::{Itinerary, PlanError, ScheduleDetail};

/// Response for a successful plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightPlanResponse {
    /// Points of the chosen itinerary, in travel order
    pub flight_plan: Vec<ScheduleDetail>,
}

impl FlightPlanResponse {
    /// Create from a domain Itinerary.
    pub fn from_itinerary(itinerary: Itinerary) -> Self {
        Self {
            flight_plan: itinerary.into_points(),
        }
    }
}

/// Error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Stable error code
    pub code: u16,

    /// Human-readable message
    pub message: String,
}

impl ErrorResponse {
    /// Create from a planning error, dropping any internal detail.
    pub fn from_error(error: &PlanError) -> Self {
        Self {
            code: error.code(),
            message: error.public_message().to_string(),
        }
    }
}
