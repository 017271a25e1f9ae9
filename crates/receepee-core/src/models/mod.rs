// ABOUTME: Core data models for recipe discovery
// ABOUTME: Re-exports recipe summary/detail payloads and client-side filter settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Receepee Contributors

/// Client-side filter and sort configuration
pub mod filters;
/// Recipe payloads returned by the upstream API
pub mod recipe;

pub use filters::{SearchFilters, SortMode};
pub use recipe::{
    AnalyzedInstruction, ExtendedIngredient, InstructionStep, Measure, Measures,
    RandomRecipesResponse, RecipeDetail, RecipeId, RecipeIngredient, RecipeSummary, StepItem,
    StepLength,
};
