// ABOUTME: Unit tests for config environment functionality
// ABOUTME: Validates env parsing, API key fallbacks, cache timing, and summary masking
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Receepee Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use receepee::config::environment::{ApiConfig, AppConfig, Environment};
use receepee::config::QueryTimingConfig;
use receepee::logging::{LogFormat, LoggingConfig};
use serial_test::serial;
use std::env;
use std::time::Duration;

const API_VARS: [&str; 4] = [
    "SPOONACULAR_API_KEY",
    "VITE_SPOONACULAR_API_KEY",
    "SPOONACULAR_BASE_URL",
    "SPOONACULAR_TIMEOUT_SECS",
];

const CACHE_VARS: [&str; 6] = [
    "RECEEPEE_SEARCH_STALE_SECS",
    "RECEEPEE_SEARCH_RETENTION_SECS",
    "RECEEPEE_DETAIL_STALE_SECS",
    "RECEEPEE_DETAIL_RETENTION_SECS",
    "RECEEPEE_CACHE_MAX_ENTRIES",
    "RECEEPEE_CACHE_CLEANUP_INTERVAL_SECS",
];

fn clear_vars(vars: &[&str]) {
    for var in vars {
        env::remove_var(var);
    }
}

// Tests for public configuration types

#[test]
fn test_environment_parsing() {
    assert_eq!(
        Environment::from_str_or_default("production"),
        Environment::Production
    );
    assert_eq!(Environment::from_str_or_default("PROD"), Environment::Production);
    assert_eq!(Environment::from_str_or_default("test"), Environment::Testing);
    assert_eq!(
        Environment::from_str_or_default("staging"),
        Environment::Development
    );
    assert!(Environment::Production.is_production());
    assert!(!Environment::Testing.is_production());
}

#[test]
#[serial]
fn test_api_config_defaults_to_demo_key() {
    clear_vars(&API_VARS);

    let config = ApiConfig::from_env();
    assert_eq!(config, ApiConfig::default());
    assert!(config.uses_placeholder_key());
    assert_eq!(config.base_url, "https://api.spoonacular.com");
    assert!(config.client_config().request_timeout.is_none());
}

#[test]
#[serial]
fn test_api_config_reads_environment() {
    clear_vars(&API_VARS);
    env::set_var("SPOONACULAR_API_KEY", "abcdef123456");
    env::set_var("SPOONACULAR_BASE_URL", "http://localhost:8089");
    env::set_var("SPOONACULAR_TIMEOUT_SECS", "15");

    let config = ApiConfig::from_env();
    assert_eq!(config.api_key, "abcdef123456");
    assert!(!config.uses_placeholder_key());

    let client = config.client_config();
    assert_eq!(client.base_url, "http://localhost:8089");
    assert_eq!(client.request_timeout, Some(Duration::from_secs(15)));

    clear_vars(&API_VARS);
}

#[test]
#[serial]
fn test_api_key_falls_back_to_legacy_variable() {
    clear_vars(&API_VARS);
    env::set_var("SPOONACULAR_API_KEY", "   ");
    env::set_var("VITE_SPOONACULAR_API_KEY", "legacy-key");
    env::set_var("SPOONACULAR_TIMEOUT_SECS", "soon");

    let config = ApiConfig::from_env();
    assert_eq!(config.api_key, "legacy-key");
    assert_eq!(config.timeout_secs, None);

    clear_vars(&API_VARS);
}

#[test]
fn test_masked_api_key() {
    let config = ApiConfig {
        api_key: "abcdef123456".to_owned(),
        ..ApiConfig::default()
    };
    assert_eq!(config.masked_api_key(), "********3456");

    let short = ApiConfig {
        api_key: "abc".to_owned(),
        ..ApiConfig::default()
    };
    assert_eq!(short.masked_api_key(), "***");
}

#[test]
#[serial]
fn test_cache_timing_from_env() {
    clear_vars(&CACHE_VARS);
    env::set_var("RECEEPEE_SEARCH_STALE_SECS", "60");
    env::set_var("RECEEPEE_DETAIL_RETENTION_SECS", "not-a-number");
    env::set_var("RECEEPEE_CACHE_MAX_ENTRIES", "32");

    let timing = QueryTimingConfig::from_env();
    assert_eq!(timing.search_stale_secs, 60);
    assert_eq!(timing.search_retention_secs, 1800);
    assert_eq!(timing.detail_retention_secs, 3600); // invalid value falls back
    assert_eq!(timing.max_entries, 32);

    let search = timing.search_policy();
    assert_eq!(search.stale_time, Duration::from_secs(60));
    assert_eq!(timing.detail_policy().stale_time, Duration::from_secs(600));

    let cache = timing.cache_config();
    assert_eq!(cache.max_entries, 32);
    assert!(cache.enable_background_cleanup);

    clear_vars(&CACHE_VARS);
}

#[test]
#[serial]
fn test_app_config_from_env() {
    clear_vars(&API_VARS);
    clear_vars(&CACHE_VARS);
    env::set_var("SPOONACULAR_API_KEY", "from-env-key");

    let config = AppConfig::from_env();
    assert_eq!(config.api.api_key, "from-env-key");
    assert_eq!(config.cache, QueryTimingConfig::default());

    clear_vars(&API_VARS);
}

#[test]
#[serial]
fn test_logging_config_reads_environment() {
    let vars = [
        "ENVIRONMENT",
        "RUST_LOG",
        "LOG_FORMAT",
        "LOG_INCLUDE_LOCATION",
        "LOG_INCLUDE_THREAD",
    ];
    clear_vars(&vars);

    let local = LoggingConfig::from_env();
    assert_eq!(local.environment, Environment::Development);
    assert_eq!(local.level, "warn");
    assert!(!local.include_location);
    assert!(!local.include_thread);

    env::set_var("ENVIRONMENT", "prod");
    env::set_var("RUST_LOG", "info,receepee=debug");
    env::set_var("LOG_FORMAT", "json");

    let production = LoggingConfig::from_env();
    assert_eq!(production.environment, Environment::Production);
    assert_eq!(production.level, "info,receepee=debug");
    assert_eq!(production.format, LogFormat::Json);
    assert!(production.include_location);
    assert!(production.include_thread);

    clear_vars(&vars);
}

#[test]
fn test_summary_never_prints_the_key() {
    let config = AppConfig {
        api: ApiConfig {
            api_key: "supersecret9876".to_owned(),
            timeout_secs: Some(20),
            ..ApiConfig::default()
        },
        ..AppConfig::default()
    };

    let summary = config.summary();
    assert!(!summary.contains("supersecret"));
    assert!(summary.contains("***********9876"));
    assert!(summary.contains("Request Timeout: 20s"));
    assert!(summary.contains("Search cache: fresh 300s, retained 1800s"));

    let demo = AppConfig::default().summary();
    assert!(demo.contains("API Key: placeholder (demo)"));
    assert!(demo.contains("Request Timeout: platform default"));
}
