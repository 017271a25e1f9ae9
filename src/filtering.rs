// ABOUTME: Local filter and sort engine over fetched recipe summaries
// ABOUTME: Applies the max-missing threshold then a stable sort by the selected mode
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Receepee Contributors

use crate::models::{RecipeSummary, SearchFilters, SortMode};
use std::cmp::Reverse;

/// Filter `recipes` by the missing-ingredient threshold, then sort them
///
/// The input is never modified. Every sort is stable, so ties keep the
/// order the API returned them in, and `Relevance` keeps that order as is.
#[must_use]
pub fn apply_filters(recipes: &[RecipeSummary], filters: &SearchFilters) -> Vec<RecipeSummary> {
    let mut filtered: Vec<RecipeSummary> = recipes
        .iter()
        .filter(|recipe| recipe.missed_ingredient_count <= filters.max_missing)
        .cloned()
        .collect();

    match filters.sort {
        SortMode::Relevance => {}
        SortMode::FewestMissing => filtered.sort_by_key(|recipe| recipe.missed_ingredient_count),
        SortMode::MostPopular => filtered.sort_by_key(|recipe| Reverse(recipe.popularity())),
    }

    filtered
}
