//! Temporal flight graph.
//!
//! Each city maps to every edge touching it. A leg contributes a forward
//! edge under its departure city and a reverse edge under its arrival city,
//! so either endpoint can enumerate all of its legs. Only forward edges are
//! ever traversed by the search.

use std::collections::HashMap;

use crate::domain::{FlightDetail, PlanError, ScheduleDetail};

/// An edge leaving a city.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    /// The point this edge leads to.
    pub target: ScheduleDetail,

    /// Airborne time of the underlying leg.
    pub duration: i64,

    /// Timestamp at the city this edge leaves from. For a forward edge this
    /// is the flight's departure time.
    pub origin_departure: i64,

    /// Set on the synthetic back-edge stored under the arrival city.
    pub is_reverse: bool,
}

/// Adjacency map from city name to its edges.
///
/// Immutable once built for a request.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    edges: HashMap<String, Vec<Edge>>,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from flight legs.
    ///
    /// Fails with [`PlanError::InvalidFlightSchedule`] if a leg is missing
    /// either end.
    pub fn build(schedules: &[FlightDetail]) -> Result<Self, PlanError> {
        let mut graph = Self::new();
        for schedule in schedules {
            let (departure, arrival) = schedule
                .endpoints()
                .ok_or(PlanError::InvalidFlightSchedule)?;
            let duration = schedule
                .duration()
                .ok_or(PlanError::InvalidFlightSchedule)?;
            graph.add_edge(departure, arrival, duration);
        }
        Ok(graph)
    }

    /// Add a leg from `origin` to `destination`.
    ///
    /// Inserts the forward edge under the origin city and the reverse edge
    /// under the destination city. Each keeps the timestamp at the city it
    /// is stored under.
    pub fn add_edge(&mut self, origin: &ScheduleDetail, destination: &ScheduleDetail, duration: i64) {
        self.edges
            .entry(origin.city.clone())
            .or_default()
            .push(Edge {
                target: destination.clone(),
                duration,
                origin_departure: origin.timestamp,
                is_reverse: false,
            });

        self.edges
            .entry(destination.city.clone())
            .or_default()
            .push(Edge {
                target: origin.clone(),
                duration,
                origin_departure: destination.timestamp,
                is_reverse: true,
            });
    }

    /// All edges touching `city`, forward and reverse, in insertion order.
    pub fn edges_of(&self, city: &str) -> &[Edge] {
        self.edges.get(city).map(Vec::as_slice).unwrap_or(&[])
    }
}
