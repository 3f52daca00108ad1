//! The typed trip request passed through the planning pipeline.

use serde::{Deserialize, Serialize};

use super::{FlightDetail, PlanError};

/// Where the traveller starts and wants to end up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripPlan {
    pub start_city: String,
    pub end_city: String,
}

impl TripPlan {
    pub fn new(start_city: impl Into<String>, end_city: impl Into<String>) -> Self {
        Self {
            start_city: start_city.into(),
            end_city: end_city.into(),
        }
    }

    /// Returns true if origin and destination name the same city.
    pub fn is_round_trip(&self) -> bool {
        self.start_city == self.end_city
    }
}

/// A request to find the shortest itinerary.
///
/// `preferred_time` is a departure cutoff; 0 (the default) disables
/// filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRequest {
    #[serde(default)]
    pub preferred_time: i64,
    pub trip_plan: TripPlan,
    pub schedules: Vec<FlightDetail>,
}

impl TripRequest {
    /// Create a request without a departure cutoff.
    pub fn new(trip_plan: TripPlan, schedules: Vec<FlightDetail>) -> Self {
        Self {
            preferred_time: 0,
            trip_plan,
            schedules,
        }
    }

    /// Set the departure cutoff.
    pub fn with_preferred_time(mut self, preferred_time: i64) -> Self {
        self.preferred_time = preferred_time;
        self
    }

    /// Parse and validate a JSON request body.
    ///
    /// Missing `trip_plan` or `schedules`, or blank city names, are request
    /// errors. A leg missing one of its ends is not: that surfaces later as
    /// [`PlanError::InvalidFlightSchedule`].
    pub fn from_json(body: &[u8]) -> Result<Self, PlanError> {
        let request: TripRequest =
            serde_json::from_slice(body).map_err(|e| PlanError::InvalidRequest(e.to_string()))?;
        request.validate()?;
        Ok(request)
    }

    /// Check the fields the transport layer requires.
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.trip_plan.start_city.trim().is_empty() {
            return Err(PlanError::InvalidRequest("start_city is empty".to_string()));
        }
        if self.trip_plan.end_city.trim().is_empty() {
            return Err(PlanError::InvalidRequest("end_city is empty".to_string()));
        }
        Ok(())
    }
}
