// ABOUTME: Core types and constants for the receepee recipe discovery client
// ABOUTME: Foundation crate with error handling, recipe models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Receepee Contributors

#![deny(unsafe_code)]

//! # Receepee Core
//!
//! Foundation crate providing shared types and constants for the receepee
//! recipe discovery client. It carries no I/O so it can be reused by any
//! front-end that talks to the recipe-matching API.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: API endpoints, cache windows, search sizing, ingredient vocabulary
//! - **models**: Recipe summaries, recipe details, and filter configuration

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Recipe data models returned by the upstream API and client-side filter settings
pub mod models;
