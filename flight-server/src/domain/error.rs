//! Planning error types.
//!
//! Every error a caller can see carries a stable numeric code and a fixed
//! human message. Neither reveals anything about the graph or the search.

/// Errors that end a planning request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// The inbound payload is malformed or incomplete.
    ///
    /// The detail is kept for logs only; it never reaches the response body.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The destination cannot be reached from the origin.
    #[error("no flights available for the given cities")]
    NoFlightsAvailable,

    /// Origin and destination are the same city.
    #[error("source and destination cannot be same")]
    SameStartEndCity,

    /// A leg is missing a point, has a non-positive timestamp, or lands
    /// before it takes off.
    #[error("invalid flight schedule")]
    InvalidFlightSchedule,

    /// The search popped more states than the configured bound.
    #[error("search limit of {limit} states exceeded")]
    SearchLimitExceeded { limit: usize },
}

impl PlanError {
    /// Stable machine-readable code.
    pub fn code(&self) -> u16 {
        match self {
            PlanError::InvalidRequest(_) => 101,
            PlanError::NoFlightsAvailable => 102,
            PlanError::SameStartEndCity => 103,
            PlanError::InvalidFlightSchedule => 104,
            PlanError::SearchLimitExceeded { .. } => 105,
        }
    }

    /// Message shown to API clients.
    pub fn public_message(&self) -> &'static str {
        match self {
            PlanError::InvalidRequest(_) => {
                "Invalid request. Please provide all required parameters in the request."
            }
            PlanError::NoFlightsAvailable => "No flights available for the given cities.",
            PlanError::SameStartEndCity => "Source and Destination cannot be same",
            PlanError::InvalidFlightSchedule => {
                "One or more flight schedule provided in the request are invalid. \
                 Please make sure each flight schedule has valid arrival and departure details."
            }
            PlanError::SearchLimitExceeded { .. } => {
                "Too many possible itineraries to explore for this request."
            }
        }
    }
}
