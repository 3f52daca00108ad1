//! Caching layer for planned itineraries.
//!
//! Results are stored as JSON under a fingerprint of the whole request, so
//! any change to the trip, the cutoff or a single leg is a different key.
//! The cache is best-effort: a value that fails to decode is a miss, and a
//! value that fails to encode is simply not stored.
//!
//! There is no single-flight coalescing. Concurrent identical misses each
//! run the planner and the last insert wins.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use moka::future::Cache as MokaCache;
use tracing::{debug, info, warn};

use crate::domain::{Itinerary, PlanError, TripRequest};
use crate::planner::FlightPlanner;

/// Suffix appended to every fingerprint.
const FINGERPRINT_SUFFIX: &str = "-flight-path";

/// Longest TTL moka accepts.
pub const MAX_CACHE_TTL: Duration = Duration::from_secs(1000 * 365 * 24 * 60 * 60);

/// Configuration for the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(24 * 60 * 60),
            max_capacity: 10_000,
        }
    }
}

/// Compute the cache key for a request.
///
/// Deterministic: start and end city, cutoff, and the legs in request
/// order, base64-encoded.
pub fn fingerprint(request: &TripRequest) -> Result<String, serde_json::Error> {
    let schedules = serde_json::to_string(&request.schedules)?;
    let raw = format!(
        "{}_{}_{}{}",
        request.trip_plan.start_city, request.trip_plan.end_city, request.preferred_time, schedules
    );
    Ok(format!("{}{}", STANDARD.encode(raw), FINGERPRINT_SUFFIX))
}

/// Serialized itineraries keyed by request fingerprint.
pub struct ItineraryCache {
    entries: MokaCache<String, String>,
}

impl ItineraryCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let entries = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { entries }
    }

    /// Look up an itinerary.
    ///
    /// An entry that no longer decodes is treated as a miss.
    pub async fn get(&self, key: &str) -> Option<Itinerary> {
        let raw = self.entries.get(key).await?;
        match serde_json::from_str(&raw) {
            Ok(itinerary) => Some(itinerary),
            Err(e) => {
                warn!(key = %key, error = %e, "Discarding undecodable cached itinerary");
                None
            }
        }
    }

    /// Store an itinerary. Encoding failures are logged, not returned.
    pub async fn put(&self, key: String, itinerary: &Itinerary) {
        match serde_json::to_string(itinerary) {
            Ok(raw) => self.entries.insert(key, raw).await,
            Err(e) => warn!(key = %key, error = %e, "Failed to encode itinerary for cache"),
        }
    }

    /// Store an already-serialized value.
    #[cfg(test)]
    async fn put_raw(&self, key: String, raw: String) {
        self.entries.insert(key, raw).await;
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }

    /// Flush pending maintenance so counts are up to date.
    #[cfg(test)]
    async fn sync(&self) {
        self.entries.run_pending_tasks().await;
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.entries.invalidate_all();
    }
}

/// Flight planner with caching.
///
/// Wraps a `FlightPlanner` and caches successful results. Errors are never
/// cached.
pub struct CachedPlanner {
    planner: FlightPlanner,
    cache: ItineraryCache,
}

impl CachedPlanner {
    /// Create a new cached planner.
    pub fn new(planner: FlightPlanner, cache_config: &CacheConfig) -> Self {
        Self {
            planner,
            cache: ItineraryCache::new(cache_config),
        }
    }

    /// Plan an itinerary, using the cache if available.
    pub async fn plan(&self, request: &TripRequest) -> Result<Itinerary, PlanError> {
        if request.trip_plan.is_round_trip() {
            return Err(PlanError::SameStartEndCity);
        }

        let key = match fingerprint(request) {
            Ok(key) => key,
            Err(e) => {
                warn!(error = %e, "Failed to fingerprint request, planning uncached");
                return self.planner.plan(request);
            }
        };

        // Try cache first
        if let Some(itinerary) = self.cache.get(&key).await {
            info!(
                start = %request.trip_plan.start_city,
                end = %request.trip_plan.end_city,
                "Returning itinerary from cache"
            );
            return Ok(itinerary);
        }

        debug!(
            start = %request.trip_plan.start_city,
            end = %request.trip_plan.end_city,
            "Calculating itinerary"
        );
        let itinerary = self.planner.plan(request)?;

        self.cache.put(key, &itinerary).await;

        info!(
            points = itinerary.len(),
            duration = itinerary.duration(),
            "Calculated itinerary"
        );

        Ok(itinerary)
    }

    /// Access the underlying cache.
    pub fn cache(&self) -> &ItineraryCache {
        &self.cache
    }
}
