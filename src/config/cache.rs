// ABOUTME: Query cache timing configuration loaded from the environment
// ABOUTME: Freshness and retention windows per query kind, plus cache bounds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Receepee Contributors

use crate::cache::{QueryCacheConfig, QueryPolicy};
use crate::constants::cache;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Freshness/retention windows and cache bounds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryTimingConfig {
    /// Search results freshness window in seconds (default: 5 minutes)
    pub search_stale_secs: u64,
    /// Search results retention window in seconds (default: 30 minutes)
    pub search_retention_secs: u64,
    /// Recipe detail freshness window in seconds (default: 10 minutes)
    pub detail_stale_secs: u64,
    /// Recipe detail retention window in seconds (default: 1 hour)
    pub detail_retention_secs: u64,
    /// Maximum number of cached queries
    pub max_entries: usize,
    /// Cleanup interval for unused entries in seconds
    pub cleanup_interval_secs: u64,
}

impl Default for QueryTimingConfig {
    fn default() -> Self {
        Self {
            search_stale_secs: cache::SEARCH_STALE_SECS,
            search_retention_secs: cache::SEARCH_RETENTION_SECS,
            detail_stale_secs: cache::DETAIL_STALE_SECS,
            detail_retention_secs: cache::DETAIL_RETENTION_SECS,
            max_entries: cache::DEFAULT_MAX_ENTRIES,
            cleanup_interval_secs: cache::DEFAULT_CLEANUP_INTERVAL_SECS,
        }
    }
}

impl QueryTimingConfig {
    /// Load cache timing configuration from environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            search_stale_secs: env_parse_or(
                "RECEEPEE_SEARCH_STALE_SECS",
                cache::SEARCH_STALE_SECS,
            ),
            search_retention_secs: env_parse_or(
                "RECEEPEE_SEARCH_RETENTION_SECS",
                cache::SEARCH_RETENTION_SECS,
            ),
            detail_stale_secs: env_parse_or(
                "RECEEPEE_DETAIL_STALE_SECS",
                cache::DETAIL_STALE_SECS,
            ),
            detail_retention_secs: env_parse_or(
                "RECEEPEE_DETAIL_RETENTION_SECS",
                cache::DETAIL_RETENTION_SECS,
            ),
            max_entries: env_parse_or("RECEEPEE_CACHE_MAX_ENTRIES", cache::DEFAULT_MAX_ENTRIES),
            cleanup_interval_secs: env_parse_or(
                "RECEEPEE_CACHE_CLEANUP_INTERVAL_SECS",
                cache::DEFAULT_CLEANUP_INTERVAL_SECS,
            ),
        }
    }

    /// Policy applied to search-by-ingredients queries
    #[must_use]
    pub const fn search_policy(&self) -> QueryPolicy {
        QueryPolicy::new(
            Duration::from_secs(self.search_stale_secs),
            Duration::from_secs(self.search_retention_secs),
        )
    }

    /// Policy applied to recipe detail queries
    #[must_use]
    pub const fn detail_policy(&self) -> QueryPolicy {
        QueryPolicy::new(
            Duration::from_secs(self.detail_stale_secs),
            Duration::from_secs(self.detail_retention_secs),
        )
    }

    /// Runtime cache configuration with background cleanup enabled
    #[must_use]
    pub const fn cache_config(&self) -> QueryCacheConfig {
        QueryCacheConfig {
            max_entries: self.max_entries,
            cleanup_interval: Duration::from_secs(self.cleanup_interval_secs),
            enable_background_cleanup: true,
        }
    }
}

fn env_parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
