//! Search configuration for the flight planner.

/// Default bound on the number of path states the search may pop.
pub const DEFAULT_MAX_STATES: usize = 100_000;

/// Configuration parameters for itinerary search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Maximum number of path states popped from the queue before the
    /// search gives up with `SearchLimitExceeded`.
    pub max_states: usize,
}

impl SearchConfig {
    /// Create a new configuration with the given state bound.
    pub fn new(max_states: usize) -> Self {
        Self { max_states }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_states: DEFAULT_MAX_STATES,
        }
    }
}
