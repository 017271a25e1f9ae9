// ABOUTME: Main library entry point for the receepee recipe discovery client
// ABOUTME: Wires the Spoonacular client, query cache, filter engine, and session state machine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Receepee Contributors

#![deny(unsafe_code)]

//! # Receepee
//!
//! Pantry-driven recipe discovery: the user enters the ingredients they have,
//! the client asks the Spoonacular recipe-matching API which recipes use them,
//! and the results are filtered, sorted, and drilled into locally.
//!
//! ## Architecture
//!
//! Leaf-first:
//! - **external**: HTTP client wrapper around the three upstream endpoints
//! - **cache**: keyed query cache with freshness/retention windows and in-flight dedupe
//! - **queries**: the search/detail queries the session consumes, built on the cache
//! - **filtering**: pure filter/sort over fetched search results
//! - **session**: ingredient set, state machine, driver, text rendering
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use receepee::config::environment::AppConfig;
//! use receepee::queries::RecipeQueries;
//! use receepee::session::{Event, Session};
//!
//! # async fn example() -> Result<(), receepee::errors::AppError> {
//! let config = AppConfig::from_env();
//! let mut session = Session::new(RecipeQueries::from_config(&config)?);
//!
//! session
//!     .dispatch(Event::AddIngredients(vec!["chicken".into(), "rice".into()]))
//!     .await;
//!
//! println!("{}", receepee::session::render::render_session(session.state()));
//! # Ok(())
//! # }
//! ```

// Re-export receepee-core modules so every layer can use `crate::errors` etc.
pub use receepee_core::constants;
pub use receepee_core::errors;
pub use receepee_core::models;

/// Keyed query cache with freshness and retention windows
pub mod cache;

/// Environment-driven configuration
pub mod config;

/// External API clients (Spoonacular)
pub mod external;

/// Pure filter/sort engine over search results
pub mod filtering;

/// Logging configuration and structured logging setup
pub mod logging;

/// Search and detail queries backed by the query cache
pub mod queries;

/// Session state machine, driver, and text views
pub mod session;
