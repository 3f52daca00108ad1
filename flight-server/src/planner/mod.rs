//! Shortest-itinerary planner.
//!
//! Answers: "given these flight legs, what is the quickest way from the
//! start city to the end city, waiting time included?"
//!
//! Legs are filtered by the requested departure cutoff, turned into a
//! temporal graph, and searched best-first over whole paths so that every
//! connection respects the clock. Among equally quick itineraries the one
//! with the fewest stops is returned.

mod config;
mod filter;
mod graph;
mod search;
mod select;


use tracing::debug;

use crate::domain::{Itinerary, PlanError, TripRequest};

pub use config::{DEFAULT_MAX_STATES, SearchConfig};
pub use filter::filter_schedules;
pub use graph::{Edge, Graph};
pub use search::{ItinerariesByDuration, SearchOutcome, search};
pub use select::select_itinerary;

/// Runs the full pipeline for a single request.
///
/// Holds no per-request state; one planner can serve any number of
/// concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct FlightPlanner {
    config: SearchConfig,
}

impl FlightPlanner {
    /// Create a planner with the given search configuration.
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Find the shortest itinerary for `request`.
    ///
    /// # Errors
    ///
    /// - [`PlanError::SameStartEndCity`] before anything else is looked at
    /// - [`PlanError::InvalidFlightSchedule`] if any leg is malformed
    /// - [`PlanError::NoFlightsAvailable`] if the destination is unreachable
    /// - [`PlanError::SearchLimitExceeded`] if the search grows too large
    pub fn plan(&self, request: &TripRequest) -> Result<Itinerary, PlanError> {
        let trip = &request.trip_plan;
        if trip.is_round_trip() {
            return Err(PlanError::SameStartEndCity);
        }

        let schedules = filter_schedules(&request.schedules, request.preferred_time)?;
        let graph = Graph::build(&schedules)?;

        let outcome = search(&graph, &trip.start_city, &trip.end_city, &self.config)?;

        debug!(
            start = %trip.start_city,
            end = %trip.end_city,
            legs = schedules.len(),
            min_duration = outcome.min_duration,
            states_explored = outcome.states_explored,
            "Search finished"
        );

        select_itinerary(outcome.min_duration, &outcome.itineraries)
    }
}
