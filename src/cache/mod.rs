// ABOUTME: Query cache abstraction for recipe API responses keyed by operation and parameters
// ABOUTME: Defines query keys, freshness/retention policies, and observable query state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Receepee Contributors

/// In-memory query cache with in-flight request sharing
pub mod query_cache;

pub use query_cache::QueryCache;

use crate::constants::cache::{
    DEFAULT_CLEANUP_INTERVAL_SECS, DEFAULT_MAX_ENTRIES, DETAIL_RETENTION_SECS, DETAIL_STALE_SECS,
    SEARCH_RETENTION_SECS, SEARCH_STALE_SECS,
};
use crate::errors::AppError;
use crate::models::RecipeId;
use std::fmt;
use std::time::Duration;
use tokio::time::Instant;

/// Cache configuration
#[derive(Debug, Clone)]
pub struct QueryCacheConfig {
    /// Maximum number of cached queries; the least recently used is evicted beyond it
    pub max_entries: usize,
    /// Interval of the background purge of unused entries
    pub cleanup_interval: Duration,
    /// Enable background cleanup task (should be false in tests to avoid runtime conflicts)
    pub enable_background_cleanup: bool,
}

impl Default for QueryCacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            cleanup_interval: Duration::from_secs(DEFAULT_CLEANUP_INTERVAL_SECS),
            // Default to enabled - production code should use background cleanup
            // Tests can explicitly disable by setting to false
            enable_background_cleanup: true,
        }
    }
}

/// Freshness and retention windows of one kind of query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryPolicy {
    /// Data older than this is refetched on next access
    pub stale_time: Duration,
    /// Entries not accessed for this long are discarded
    pub retention: Duration,
}

impl QueryPolicy {
    /// Create a policy
    #[must_use]
    pub const fn new(stale_time: Duration, retention: Duration) -> Self {
        Self {
            stale_time,
            retention,
        }
    }

    /// Search results: fresh for 5 minutes, kept for 30
    #[must_use]
    pub const fn search() -> Self {
        Self::new(
            Duration::from_secs(SEARCH_STALE_SECS),
            Duration::from_secs(SEARCH_RETENTION_SECS),
        )
    }

    /// Recipe details: fresh for 10 minutes, kept for 60
    #[must_use]
    pub const fn detail() -> Self {
        Self::new(
            Duration::from_secs(DETAIL_STALE_SECS),
            Duration::from_secs(DETAIL_RETENTION_SECS),
        )
    }
}

/// Identity of a cached query: operation kind plus its parameters
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// Search-by-ingredients, keyed by the ingredient list
    Search {
        /// Normalized ingredient tokens in insertion order
        ingredients: Vec<String>,
    },
    /// Recipe detail, keyed by recipe id
    Detail {
        /// Recipe identifier
        recipe_id: RecipeId,
    },
    /// Random recipes, keyed by count
    Random {
        /// Number of recipes requested
        count: u32,
    },
}

impl QueryKey {
    /// Key of a search over these ingredients
    #[must_use]
    pub fn search(ingredients: &[String]) -> Self {
        Self::Search {
            ingredients: ingredients.to_vec(),
        }
    }

    /// Key of a recipe detail query
    #[must_use]
    pub const fn detail(recipe_id: RecipeId) -> Self {
        Self::Detail { recipe_id }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Search { ingredients } => write!(f, "recipes:search:{}", ingredients.join(",")),
            Self::Detail { recipe_id } => write!(f, "recipes:detail:{recipe_id}"),
            Self::Random { count } => write!(f, "recipes:random:{count}"),
        }
    }
}

/// Snapshot of one query as the view layer observes it
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    /// Last successfully fetched value
    pub data: Option<T>,
    /// Failure of the most recent fetch, cleared by the next success
    pub error: Option<AppError>,
    /// Whether a fetch for this key is in flight
    pub is_fetching: bool,
    /// When `data` was fetched
    pub data_updated_at: Option<Instant>,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            is_fetching: false,
            data_updated_at: None,
        }
    }
}

impl<T> QueryState<T> {
    /// True only while no data exists yet and a fetch is in flight
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.data.is_none() && self.is_fetching
    }

    /// True if the most recent fetch failed
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Whether the data is missing or older than the policy's freshness window
    #[must_use]
    pub fn is_stale(&self, policy: QueryPolicy) -> bool {
        self.data_updated_at
            .map_or(true, |updated| updated.elapsed() >= policy.stale_time)
    }
}
