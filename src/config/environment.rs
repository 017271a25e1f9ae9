// ABOUTME: Environment-based configuration for the recipe API and runtime settings
// ABOUTME: Strongly typed runtime environment, API credentials, and cache timing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Receepee Contributors

use super::cache::QueryTimingConfig;
use crate::constants::api;
use crate::external::SpoonacularClientConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::time::Duration;
use tracing::{info, warn};

/// Runtime environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Deployed build
    Production,
    /// Test runs
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Recipe API access configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API key sent with every request
    pub api_key: String,
    /// Base URL of the API
    pub base_url: String,
    /// Explicit request timeout in seconds; unset keeps the platform default
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: api::DEFAULT_API_KEY.to_owned(),
            base_url: api::DEFAULT_BASE_URL.to_owned(),
            timeout_secs: None,
        }
    }
}

impl ApiConfig {
    /// Load API configuration from environment
    ///
    /// The key falls back to the legacy variable name, then to the `demo` placeholder.
    #[must_use]
    pub fn from_env() -> Self {
        let api_key = [api::API_KEY_ENV, api::LEGACY_API_KEY_ENV]
            .into_iter()
            .filter_map(|name| env::var(name).ok())
            .map(|key| key.trim().to_owned())
            .find(|key| !key.is_empty())
            .unwrap_or_else(|| {
                warn!(
                    "{} not set, using placeholder key '{}'",
                    api::API_KEY_ENV,
                    api::DEFAULT_API_KEY
                );
                api::DEFAULT_API_KEY.to_owned()
            });

        Self {
            api_key,
            base_url: env::var(api::BASE_URL_ENV)
                .unwrap_or_else(|_| api::DEFAULT_BASE_URL.to_owned()),
            timeout_secs: env::var(api::TIMEOUT_ENV)
                .ok()
                .and_then(|s| s.parse().ok()),
        }
    }

    /// Whether the placeholder key is in use
    #[must_use]
    pub fn uses_placeholder_key(&self) -> bool {
        self.api_key == api::DEFAULT_API_KEY
    }

    /// API key with all but the last four characters masked
    #[must_use]
    pub fn masked_api_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.len() <= 4 {
            return "*".repeat(chars.len());
        }
        let visible: String = chars[chars.len() - 4..].iter().collect();
        format!("{}{visible}", "*".repeat(chars.len() - 4))
    }

    /// HTTP client configuration derived from this config
    #[must_use]
    pub fn client_config(&self) -> SpoonacularClientConfig {
        SpoonacularClientConfig {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            request_timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Recipe API access
    pub api: ApiConfig,
    /// Query cache timing
    pub cache: QueryTimingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        info!("Loading configuration from environment variables");

        let config = Self {
            api: ApiConfig::from_env(),
            cache: QueryTimingConfig::from_env(),
        };

        info!("{}", config.summary());
        config
    }

    /// Human-readable configuration summary with the API key masked
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Receepee Configuration:\n\
             - API Base URL: {}\n\
             - API Key: {}\n\
             - Request Timeout: {}\n\
             - Search cache: fresh {}s, retained {}s\n\
             - Detail cache: fresh {}s, retained {}s\n\
             - Cache capacity: {} entries",
            self.api.base_url,
            if self.api.uses_placeholder_key() {
                "placeholder (demo)".to_owned()
            } else {
                self.api.masked_api_key()
            },
            self.api
                .timeout_secs
                .map_or_else(|| "platform default".to_owned(), |s| format!("{s}s")),
            self.cache.search_stale_secs,
            self.cache.search_retention_secs,
            self.cache.detail_stale_secs,
            self.cache.detail_retention_secs,
            self.cache.max_entries,
        )
    }
}
