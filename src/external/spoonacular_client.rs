// ABOUTME: Spoonacular recipe API client for search-by-ingredients, recipe details, and random recipes
// ABOUTME: Builds query strings, issues GET requests, and normalizes HTTP and parse failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Receepee Contributors

//! Spoonacular API Client
//!
//! Thin wrapper over three REST endpoints of the Spoonacular food API:
//! - `GET /recipes/findByIngredients`
//! - `GET /recipes/{id}/information`
//! - `GET /recipes/random`
//!
//! The client performs no caching and no retries; both live in the query
//! layer above it. A non-success status becomes an [`AppError`] carrying the
//! status code and reason phrase, and a body that does not decode into the
//! expected shape becomes a serialization error.
//!
//! # API Reference
//! <https://spoonacular.com/food-api/docs>
//!
//! # Example
//! ```rust,no_run
//! use receepee::external::{RecipeApi, SearchByIngredientsParams, SpoonacularClient, SpoonacularClientConfig};
//!
//! # async fn example() -> Result<(), receepee::errors::AppError> {
//! let client = SpoonacularClient::new(SpoonacularClientConfig {
//!     api_key: "your_api_key".to_owned(),
//!     ..SpoonacularClientConfig::default()
//! })?;
//!
//! let params = SearchByIngredientsParams::new(vec!["chicken".into(), "rice".into()]);
//! let recipes = client.search_by_ingredients(&params).await?;
//! # Ok(())
//! # }
//! ```

use crate::constants::{api, service_names::SPOONACULAR_API};
use crate::errors::{AppError, AppResult};
use crate::models::{RandomRecipesResponse, RecipeDetail, RecipeId, RecipeSummary};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

/// Spoonacular client configuration
#[derive(Debug, Clone)]
pub struct SpoonacularClientConfig {
    /// API key (free tier available at <https://spoonacular.com/food-api>)
    pub api_key: String,
    /// Base URL (default: <https://api.spoonacular.com>)
    pub base_url: String,
    /// Optional request timeout; `None` keeps the HTTP stack's default behaviour
    pub request_timeout: Option<Duration>,
}

impl Default for SpoonacularClientConfig {
    fn default() -> Self {
        Self {
            api_key: api::DEFAULT_API_KEY.to_owned(),
            base_url: api::DEFAULT_BASE_URL.to_owned(),
            request_timeout: None,
        }
    }
}

/// How the API ranks matches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RankingMode {
    /// Maximize the number of used ingredients
    #[default]
    MaximizeUsed,
    /// Minimize the number of missing ingredients
    MinimizeMissing,
}

impl RankingMode {
    /// Wire value of the `ranking` parameter
    #[must_use]
    pub const fn as_param(self) -> u8 {
        match self {
            Self::MaximizeUsed => 1,
            Self::MinimizeMissing => 2,
        }
    }
}

impl fmt::Display for RankingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_param())
    }
}

/// Parameters of a search-by-ingredients call
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchByIngredientsParams {
    /// Normalized ingredient tokens
    pub ingredients: Vec<String>,
    /// Maximum number of recipes to return (1-100)
    pub number: u32,
    /// Ranking strategy
    pub ranking: RankingMode,
    /// Ignore typical pantry items such as water, salt, and flour
    pub ignore_pantry: bool,
}

impl SearchByIngredientsParams {
    /// Parameters with the API defaults (20 results, maximize used, pantry considered)
    #[must_use]
    pub fn new(ingredients: Vec<String>) -> Self {
        Self {
            ingredients,
            number: api::DEFAULT_SEARCH_NUMBER,
            ranking: RankingMode::MaximizeUsed,
            ignore_pantry: false,
        }
    }

    /// Parameters a browsing session uses: a fixed, generous result count so
    /// local filtering always has data to draw from
    #[must_use]
    pub fn for_session(ingredients: Vec<String>) -> Self {
        Self {
            ingredients,
            number: crate::constants::search::SESSION_RESULT_COUNT,
            ranking: RankingMode::MaximizeUsed,
            ignore_pantry: crate::constants::search::SESSION_IGNORE_PANTRY,
        }
    }

    /// Set the result count
    #[must_use]
    pub const fn with_number(mut self, number: u32) -> Self {
        self.number = number;
        self
    }

    /// Set the ranking mode
    #[must_use]
    pub const fn with_ranking(mut self, ranking: RankingMode) -> Self {
        self.ranking = ranking;
        self
    }

    /// Set whether pantry staples are ignored
    #[must_use]
    pub const fn with_ignore_pantry(mut self, ignore_pantry: bool) -> Self {
        self.ignore_pantry = ignore_pantry;
        self
    }
}

/// Recipe data source used by the query layer
///
/// Implemented over HTTP by [`SpoonacularClient`]; tests substitute scripted fakes.
#[async_trait]
pub trait RecipeApi: Send + Sync {
    /// Recipes that use the given ingredients, in the API's ranking order
    ///
    /// An empty ingredient list returns an empty list without a network call.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API answers with a non-success
    /// status, or the body cannot be decoded
    async fn search_by_ingredients(
        &self,
        params: &SearchByIngredientsParams,
    ) -> AppResult<Vec<RecipeSummary>>;

    /// Full information for one recipe
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API answers with a non-success
    /// status, or the body cannot be decoded
    async fn recipe_detail(&self, recipe_id: RecipeId) -> AppResult<RecipeDetail>;

    /// Random recipes
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API answers with a non-success
    /// status, or the body cannot be decoded
    async fn random_recipes(&self, count: u32) -> AppResult<Vec<RecipeDetail>>;
}

/// Spoonacular HTTP client
pub struct SpoonacularClient {
    config: SpoonacularClientConfig,
    http_client: reqwest::Client,
}

impl SpoonacularClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built (TLS backend initialization)
    pub fn new(config: SpoonacularClientConfig) -> AppResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }

    /// Issue a GET and decode the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &str,
        query: &[(&str, String)],
    ) -> AppResult<T> {
        let url = self.endpoint(path);
        debug!(operation, url = %url, "Calling recipe API");

        let response = self
            .http_client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| AppError::network(SPOONACULAR_API, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                operation,
                status = status.as_u16(),
                "Recipe API returned non-success status"
            );
            return Err(AppError::from_upstream(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::network(SPOONACULAR_API, e.to_string()))?;

        serde_json::from_slice(&body).map_err(|e| {
            warn!(operation, error = %e, "Recipe API returned an undecodable body");
            AppError::parse(SPOONACULAR_API, e.to_string())
        })
    }
}

fn validate_count(name: &str, value: u32) -> AppResult<()> {
    if value == 0 || value > api::MAX_RESULTS_PER_REQUEST {
        return Err(AppError::out_of_range(format!(
            "{name} must be between 1 and {}",
            api::MAX_RESULTS_PER_REQUEST
        )));
    }
    Ok(())
}

#[async_trait]
impl RecipeApi for SpoonacularClient {
    async fn search_by_ingredients(
        &self,
        params: &SearchByIngredientsParams,
    ) -> AppResult<Vec<RecipeSummary>> {
        if params.ingredients.is_empty() {
            return Ok(Vec::new());
        }
        validate_count("number", params.number)?;

        debug!(
            ingredient_count = params.ingredients.len(),
            number = params.number,
            "Searching recipes by ingredients"
        );

        self.get_json(
            "findByIngredients",
            api::FIND_BY_INGREDIENTS_PATH,
            &[
                ("apiKey", self.config.api_key.clone()),
                ("ingredients", params.ingredients.join(",")),
                ("number", params.number.to_string()),
                ("ranking", params.ranking.to_string()),
                ("ignorePantry", params.ignore_pantry.to_string()),
            ],
        )
        .await
    }

    async fn recipe_detail(&self, recipe_id: RecipeId) -> AppResult<RecipeDetail> {
        self.get_json(
            "information",
            &format!("/recipes/{recipe_id}/information"),
            &[("apiKey", self.config.api_key.clone())],
        )
        .await
        .map_err(|e| e.with_resource_id(recipe_id.to_string()))
    }

    async fn random_recipes(&self, count: u32) -> AppResult<Vec<RecipeDetail>> {
        validate_count("count", count)?;

        let response: RandomRecipesResponse = self
            .get_json(
                "random",
                api::RANDOM_PATH,
                &[
                    ("apiKey", self.config.api_key.clone()),
                    ("number", count.to_string()),
                ],
            )
            .await?;
        Ok(response.recipes)
    }
}
