// ABOUTME: Configuration management module for API access and query cache timing
// ABOUTME: Environment-only configuration loaded once at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Receepee Contributors
//! Configuration module for receepee
//!
//! - **Environment**: API key, base URL and runtime environment
//! - **Cache**: freshness/retention windows and cache bounds

/// Query cache timing configuration
pub mod cache;
/// Environment and API configuration
pub mod environment;

pub use cache::QueryTimingConfig;
pub use environment::{ApiConfig, AppConfig, Environment};
