// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, a scripted recipe API, and recipe fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Receepee Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `receepee`

use async_trait::async_trait;
use receepee::cache::{QueryCache, QueryCacheConfig};
use receepee::errors::{AppError, AppResult};
use receepee::external::{RecipeApi, SearchByIngredientsParams};
use receepee::models::{RecipeDetail, RecipeId, RecipeIngredient, RecipeSummary};
use receepee::queries::RecipeQueries;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Cache without the background cleanup task
pub fn test_cache() -> QueryCache {
    QueryCache::new(QueryCacheConfig {
        enable_background_cleanup: false,
        ..QueryCacheConfig::default()
    })
}

/// Queries over a scripted API with default freshness windows
pub fn test_queries(api: &Arc<ScriptedApi>) -> RecipeQueries {
    init_test_logging();
    let api: Arc<dyn RecipeApi> = api.clone();
    RecipeQueries::new(api, test_cache())
}

/// Search match fixture
pub fn summary(id: RecipeId, missing: u32, likes: Option<u32>) -> RecipeSummary {
    RecipeSummary {
        id,
        title: format!("Recipe {id}"),
        image: format!("https://img.spoonacular.com/recipes/{id}-312x231.jpg"),
        used_ingredient_count: 2,
        missed_ingredient_count: missing,
        used_ingredients: vec![RecipeIngredient {
            id: 5006,
            name: "chicken".into(),
            amount: 1.0,
            unit: "lb".into(),
            image: "whole-chicken.jpg".into(),
            ..RecipeIngredient::default()
        }],
        likes,
        ..RecipeSummary::default()
    }
}

/// Recipe detail fixture
pub fn detail(id: RecipeId) -> RecipeDetail {
    RecipeDetail {
        id,
        title: format!("Recipe {id}"),
        ready_in_minutes: 30,
        servings: 4,
        ..RecipeDetail::default()
    }
}

/// Recipe API fake answering from scripted responses and counting calls
#[derive(Default)]
pub struct ScriptedApi {
    delay: Option<Duration>,
    search_responses: Mutex<VecDeque<AppResult<Vec<RecipeSummary>>>>,
    search_requests: Mutex<Vec<SearchByIngredientsParams>>,
    details: Mutex<HashMap<RecipeId, RecipeDetail>>,
    detail_failures: Mutex<VecDeque<AppError>>,
    search_calls: AtomicUsize,
    detail_calls: AtomicUsize,
    random_calls: AtomicUsize,
}

impl ScriptedApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Every call sleeps this long before answering
    pub fn with_delay(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay: Some(delay),
            ..Self::default()
        })
    }

    /// Queue the answer of the next search; an empty queue answers with no recipes
    pub fn push_search(&self, response: AppResult<Vec<RecipeSummary>>) {
        self.search_responses.lock().unwrap().push_back(response);
    }

    /// Detail returned for a recipe id
    pub fn set_detail(&self, detail: RecipeDetail) {
        self.details.lock().unwrap().insert(detail.id, detail);
    }

    /// Make the next detail call fail
    pub fn push_detail_failure(&self, error: AppError) {
        self.detail_failures.lock().unwrap().push_back(error);
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    pub fn random_calls(&self) -> usize {
        self.random_calls.load(Ordering::SeqCst)
    }

    pub fn search_requests(&self) -> Vec<SearchByIngredientsParams> {
        self.search_requests.lock().unwrap().clone()
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl RecipeApi for ScriptedApi {
    async fn search_by_ingredients(
        &self,
        params: &SearchByIngredientsParams,
    ) -> AppResult<Vec<RecipeSummary>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.search_requests.lock().unwrap().push(params.clone());
        self.pause().await;
        let response = self.search_responses.lock().unwrap().pop_front();
        response.unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn recipe_detail(&self, recipe_id: RecipeId) -> AppResult<RecipeDetail> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        let failure = self.detail_failures.lock().unwrap().pop_front();
        if let Some(error) = failure {
            return Err(error);
        }
        let found = self.details.lock().unwrap().get(&recipe_id).cloned();
        found.ok_or_else(|| AppError::from_upstream(404, "Not Found"))
    }

    async fn random_recipes(&self, count: u32) -> AppResult<Vec<RecipeDetail>> {
        self.random_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        Ok((0..RecipeId::from(count)).map(|id| detail(id + 1)).collect())
    }
}
