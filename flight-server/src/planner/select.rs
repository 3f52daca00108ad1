//! Choosing one itinerary among equally short ones.

use crate::domain::{Itinerary, PlanError};

use super::search::ItinerariesByDuration;

/// Pick the canonical itinerary for `min_duration`.
///
/// Among the itineraries tied on duration the one with the fewest points
/// (fewest stops and layovers) wins; remaining ties go to the one found
/// first.
pub fn select_itinerary(
    min_duration: i64,
    itineraries: &ItinerariesByDuration,
) -> Result<Itinerary, PlanError> {
    let candidates = itineraries
        .get(&min_duration)
        .ok_or(PlanError::NoFlightsAvailable)?;

    let (_, best) = candidates
        .iter()
        .enumerate()
        .min_by_key(|(index, points)| (points.len(), *index))
        .ok_or(PlanError::NoFlightsAvailable)?;

    Ok(Itinerary::new(best.clone()))
}
