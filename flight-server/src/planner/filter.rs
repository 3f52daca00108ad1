//! Schedule filtering by departure cutoff.

use crate::domain::{FlightDetail, PlanError};

/// Validate every leg and drop those departing before `cutoff`.
///
/// The boundary is inclusive: a leg departing exactly at `cutoff` is kept.
/// A cutoff of 0 disables filtering, but the legs are still validated, so a
/// single malformed leg fails the whole request either way.
pub fn filter_schedules(
    schedules: &[FlightDetail],
    cutoff: i64,
) -> Result<Vec<FlightDetail>, PlanError> {
    for schedule in schedules {
        schedule.validate()?;
    }

    if cutoff == 0 {
        return Ok(schedules.to_vec());
    }

    Ok(schedules
        .iter()
        .filter(|s| s.departure.as_ref().is_some_and(|d| d.timestamp >= cutoff))
        .cloned()
        .collect())
}
