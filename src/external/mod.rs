// ABOUTME: External API client modules (Spoonacular recipe API)
// ABOUTME: Provides the RecipeApi seam and its HTTP implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Receepee Contributors

//! External API Clients
//!
//! This module contains the client for the recipe-matching API the session queries.

pub mod spoonacular_client;

// Re-export commonly used types
pub use spoonacular_client::{
    RankingMode, RecipeApi, SearchByIngredientsParams, SpoonacularClient,
    SpoonacularClientConfig,
};
