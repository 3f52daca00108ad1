//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::{CacheConfig, CachedPlanner};
use crate::config::AppConfig;
use crate::planner::FlightPlanner;

/// Shared application state.
///
/// Cloned into every request; the planner and its cache are shared.
#[derive(Clone)]
pub struct AppState {
    /// Cached flight planner
    pub planner: Arc<CachedPlanner>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(planner: CachedPlanner) -> Self {
        Self {
            planner: Arc::new(planner),
        }
    }

    /// Build the state described by `config`.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(CachedPlanner::new(
            FlightPlanner::new(config.search.clone()),
            &config.cache,
        ))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(CachedPlanner::new(
            FlightPlanner::default(),
            &CacheConfig::default(),
        ))
    }
}
