//! Itinerary type.
//!
//! An `Itinerary` is the answer to a trip request: the ordered city/time
//! points from the origin's departure to the destination's arrival. A
//! layover shows up as two consecutive points in the same city (arrival,
//! then the next departure).

use serde::{Deserialize, Serialize};

use super::ScheduleDetail;

/// An ordered sequence of schedule points from origin to destination.
///
/// Serialises as a bare JSON array of points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Itinerary {
    points: Vec<ScheduleDetail>,
}

impl Itinerary {
    /// Wraps the points found by the search.
    pub fn new(points: Vec<ScheduleDetail>) -> Self {
        Self { points }
    }

    /// Returns the points in travel order.
    pub fn points(&self) -> &[ScheduleDetail] {
        &self.points
    }

    /// Consumes the itinerary, returning its points.
    pub fn into_points(self) -> Vec<ScheduleDetail> {
        self.points
    }

    /// First point: the departure from the origin.
    pub fn departure(&self) -> Option<&ScheduleDetail> {
        self.points.first()
    }

    /// Last point: the arrival at the destination.
    pub fn arrival(&self) -> Option<&ScheduleDetail> {
        self.points.last()
    }

    /// Total elapsed time from first departure to final arrival.
    pub fn duration(&self) -> i64 {
        match (self.departure(), self.arrival()) {
            (Some(first), Some(last)) => last.timestamp - first.timestamp,
            _ => 0,
        }
    }

    /// Number of points, including layover points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if there are no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
