//! Schedule points and flight legs.

use serde::{Deserialize, Serialize};

use super::PlanError;

/// A city at a point in time: one end of a flight leg.
///
/// Timestamps are opaque, comparable integers (epoch seconds in practice).
/// A timestamp of 0 means "not yet bound" and only ever appears on the
/// search's synthetic origin point.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleDetail {
    pub city: String,
    pub timestamp: i64,
}

impl ScheduleDetail {
    /// Creates a point for `city` at `timestamp`.
    pub fn new(city: impl Into<String>, timestamp: i64) -> Self {
        Self {
            city: city.into(),
            timestamp,
        }
    }

    /// Creates a point whose time is not yet known.
    pub fn unbound(city: impl Into<String>) -> Self {
        Self::new(city, 0)
    }

    /// Returns true if the timestamp is still the unbound placeholder.
    pub fn is_unbound(&self) -> bool {
        self.timestamp == 0
    }
}

/// One scheduled flight, exactly as it arrived in the request.
///
/// Either end may be missing; [`FlightDetail::validate`] turns such a leg
/// into [`PlanError::InvalidFlightSchedule`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightDetail {
    #[serde(default)]
    pub departure: Option<ScheduleDetail>,
    #[serde(default)]
    pub arrival: Option<ScheduleDetail>,
}

impl FlightDetail {
    /// Creates a complete leg.
    pub fn new(departure: ScheduleDetail, arrival: ScheduleDetail) -> Self {
        Self {
            departure: Some(departure),
            arrival: Some(arrival),
        }
    }

    /// Returns both ends if present.
    pub fn endpoints(&self) -> Option<(&ScheduleDetail, &ScheduleDetail)> {
        Some((self.departure.as_ref()?, self.arrival.as_ref()?))
    }

    /// Checks the leg is usable for planning.
    ///
    /// Both ends must be present with strictly positive timestamps, and the
    /// arrival must not precede the departure.
    pub fn validate(&self) -> Result<(), PlanError> {
        let (departure, arrival) = self.endpoints().ok_or(PlanError::InvalidFlightSchedule)?;

        if departure.timestamp <= 0 || arrival.timestamp <= 0 {
            return Err(PlanError::InvalidFlightSchedule);
        }

        if arrival.timestamp < departure.timestamp {
            return Err(PlanError::InvalidFlightSchedule);
        }

        Ok(())
    }

    /// Airborne time, if both ends are present.
    pub fn duration(&self) -> Option<i64> {
        let (departure, arrival) = self.endpoints()?;
        Some(arrival.timestamp - departure.timestamp)
    }
}
