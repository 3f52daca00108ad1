//! Domain types for the flight planner.
//!
//! Schedule points, flight legs, trip requests and the itinerary that
//! answers them, plus the error taxonomy shared by every layer.

mod error;
mod itinerary;
mod request;
mod schedule;

pub use error::PlanError;
pub use itinerary::Itinerary;
pub use request::{TripPlan, TripRequest};
pub use schedule::{FlightDetail, ScheduleDetail};
