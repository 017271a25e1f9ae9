// ABOUTME: Cached recipe queries binding the API client to the query cache
// ABOUTME: Exposes search and detail queries with idle, pending, success, and error outcomes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Receepee Contributors

//! Recipe queries
//!
//! Each query is only active while its enabling condition holds: a search
//! needs at least one ingredient, a detail query needs a recipe id. Inactive
//! queries report [`QueryStatus::Idle`] without touching the cache or network.

use crate::cache::{QueryCache, QueryKey, QueryPolicy, QueryState};
use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use crate::external::{RecipeApi, SearchByIngredientsParams, SpoonacularClient};
use crate::models::{RecipeDetail, RecipeId, RecipeSummary};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

/// Observable outcome of a query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    /// Query disabled, nothing requested
    Idle,
    /// Fetch in flight
    Pending,
    /// Most recent fetch succeeded
    Success,
    /// Most recent fetch failed
    Error,
}

/// Result of a query as the view consumes it
///
/// An errored query still carries the last good data when one exists.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult<T> {
    /// Outcome of the most recent fetch
    pub status: QueryStatus,
    /// Last known data
    pub data: Option<T>,
    /// Failure of the most recent fetch
    pub error: Option<AppError>,
}

impl<T> QueryResult<T> {
    /// Disabled query: no data, no error, not loading
    #[must_use]
    pub const fn idle() -> Self {
        Self {
            status: QueryStatus::Idle,
            data: None,
            error: None,
        }
    }

    /// Successful fetch
    #[must_use]
    pub const fn success(data: T) -> Self {
        Self {
            status: QueryStatus::Success,
            data: Some(data),
            error: None,
        }
    }

    /// Failed fetch, keeping whatever data was cached before
    #[must_use]
    pub const fn failed(error: AppError, previous: Option<T>) -> Self {
        Self {
            status: QueryStatus::Error,
            data: previous,
            error: Some(error),
        }
    }

    /// Build from a cache snapshot
    #[must_use]
    pub fn from_state(state: QueryState<T>) -> Self {
        let status = if state.is_fetching {
            QueryStatus::Pending
        } else if state.error.is_some() {
            QueryStatus::Error
        } else if state.data.is_some() {
            QueryStatus::Success
        } else {
            QueryStatus::Idle
        };
        Self {
            status,
            data: state.data,
            error: state.error,
        }
    }

    /// True only while no data exists yet and a fetch is in flight
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.status, QueryStatus::Pending) && self.data.is_none()
    }

    /// True if the most recent fetch failed
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.status, QueryStatus::Error)
    }

    /// True for a disabled query
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self.status, QueryStatus::Idle)
    }

    /// True if the most recent fetch succeeded
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.status, QueryStatus::Success)
    }
}

/// Search and detail queries served through a shared [`QueryCache`]
#[derive(Clone)]
pub struct RecipeQueries {
    api: Arc<dyn RecipeApi>,
    cache: QueryCache,
    search_policy: QueryPolicy,
    detail_policy: QueryPolicy,
}

impl RecipeQueries {
    /// Create queries over an API and cache with the default windows
    #[must_use]
    pub fn new(api: Arc<dyn RecipeApi>, cache: QueryCache) -> Self {
        Self {
            api,
            cache,
            search_policy: QueryPolicy::search(),
            detail_policy: QueryPolicy::detail(),
        }
    }

    /// Override the freshness and retention windows
    #[must_use]
    pub const fn with_policies(mut self, search: QueryPolicy, detail: QueryPolicy) -> Self {
        self.search_policy = search;
        self.detail_policy = detail;
        self
    }

    /// Build the production client, cache, and policies from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let client = SpoonacularClient::new(config.api.client_config())?;
        let cache = QueryCache::new(config.cache.cache_config());
        Ok(Self::new(Arc::new(client), cache)
            .with_policies(config.cache.search_policy(), config.cache.detail_policy()))
    }

    /// The cache backing these queries
    #[must_use]
    pub const fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Search recipes by ingredients, served from cache while fresh
    pub async fn search_recipes(
        &self,
        params: &SearchByIngredientsParams,
    ) -> QueryResult<Vec<RecipeSummary>> {
        if params.ingredients.is_empty() {
            return QueryResult::idle();
        }
        let key = QueryKey::search(&params.ingredients);
        let api = Arc::clone(&self.api);
        let request = params.clone();
        let outcome = self
            .cache
            .fetch(&key, self.search_policy, move || async move {
                api.search_by_ingredients(&request).await
            })
            .await;
        self.resolve(&key, outcome).await
    }

    /// Re-issue a search ignoring freshness
    pub async fn refetch_search(
        &self,
        params: &SearchByIngredientsParams,
    ) -> QueryResult<Vec<RecipeSummary>> {
        if params.ingredients.is_empty() {
            return QueryResult::idle();
        }
        let key = QueryKey::search(&params.ingredients);
        let api = Arc::clone(&self.api);
        let request = params.clone();
        let outcome = self
            .cache
            .refetch(&key, self.search_policy, move || async move {
                api.search_by_ingredients(&request).await
            })
            .await;
        self.resolve(&key, outcome).await
    }

    /// Recipe detail for the selected id; idle when nothing is selected
    pub async fn recipe_details(&self, recipe_id: Option<RecipeId>) -> QueryResult<RecipeDetail> {
        let Some(recipe_id) = recipe_id else {
            return QueryResult::idle();
        };
        let key = QueryKey::detail(recipe_id);
        let api = Arc::clone(&self.api);
        let outcome = self
            .cache
            .fetch(&key, self.detail_policy, move || async move {
                api.recipe_detail(recipe_id).await
            })
            .await;
        self.resolve(&key, outcome).await
    }

    /// Re-issue a detail fetch ignoring freshness
    pub async fn refetch_details(&self, recipe_id: RecipeId) -> QueryResult<RecipeDetail> {
        let key = QueryKey::detail(recipe_id);
        let api = Arc::clone(&self.api);
        let outcome = self
            .cache
            .refetch(&key, self.detail_policy, move || async move {
                api.recipe_detail(recipe_id).await
            })
            .await;
        self.resolve(&key, outcome).await
    }

    /// Random recipes, always fetched from the network
    pub async fn random_recipes(&self, count: u32) -> QueryResult<Vec<RecipeDetail>> {
        debug!(count, "Fetching random recipes (uncached)");
        match self.api.random_recipes(count).await {
            Ok(recipes) => QueryResult::success(recipes),
            Err(error) => QueryResult::failed(error, None),
        }
    }

    /// Current cache snapshot of a search without issuing a fetch
    pub async fn search_snapshot(&self, ingredients: &[String]) -> QueryResult<Vec<RecipeSummary>> {
        if ingredients.is_empty() {
            return QueryResult::idle();
        }
        self.snapshot(&QueryKey::search(ingredients)).await
    }

    /// Current cache snapshot of a detail query without issuing a fetch
    pub async fn detail_snapshot(&self, recipe_id: Option<RecipeId>) -> QueryResult<RecipeDetail> {
        match recipe_id {
            Some(id) => self.snapshot(&QueryKey::detail(id)).await,
            None => QueryResult::idle(),
        }
    }

    async fn snapshot<T: DeserializeOwned>(&self, key: &QueryKey) -> QueryResult<T> {
        match self.cache.state(key).await {
            Ok(state) => QueryResult::from_state(state),
            Err(error) => QueryResult::failed(error, None),
        }
    }

    async fn resolve<T: DeserializeOwned>(
        &self,
        key: &QueryKey,
        outcome: AppResult<T>,
    ) -> QueryResult<T> {
        match outcome {
            Ok(data) => QueryResult::success(data),
            Err(error) => {
                let previous = self.cache.cached_data(key).await;
                QueryResult::failed(error, previous)
            }
        }
    }
}
