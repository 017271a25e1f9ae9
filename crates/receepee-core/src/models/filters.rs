// ABOUTME: Client-side filter configuration for fetched search results
// ABOUTME: Max-missing threshold and the three sort orders offered by the filter panel
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Receepee Contributors

use crate::constants::search::DEFAULT_MAX_MISSING;
use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order applied to the filtered result list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Keep the ranking returned by the API
    #[default]
    Relevance,
    /// Ascending by missing-ingredient count
    FewestMissing,
    /// Descending by popularity score
    MostPopular,
}

impl SortMode {
    /// All modes in panel order
    pub const ALL: [Self; 3] = [Self::Relevance, Self::FewestMissing, Self::MostPopular];

    /// Label shown in the filter panel
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Relevance => "Relevance",
            Self::FewestMissing => "Fewest Missing",
            Self::MostPopular => "Most Popular",
        }
    }

    /// Canonical machine name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::FewestMissing => "fewest-missing",
            Self::MostPopular => "most-popular",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "relevance" => Ok(Self::Relevance),
            "fewest-missing" | "fewest_missing" | "missedingredients" => Ok(Self::FewestMissing),
            "most-popular" | "most_popular" | "likes" => Ok(Self::MostPopular),
            other => Err(AppError::invalid_input(format!(
                "Unknown sort mode '{other}' (expected relevance, fewest-missing, or most-popular)"
            ))),
        }
    }
}

/// Filter settings; live only in session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    /// Keep recipes with at most this many missing ingredients
    pub max_missing: u32,
    /// Order of the displayed list
    pub sort: SortMode,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            max_missing: DEFAULT_MAX_MISSING,
            sort: SortMode::Relevance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_mode_parsing_accepts_aliases() {
        assert_eq!("relevance".parse::<SortMode>().unwrap(), SortMode::Relevance);
        assert_eq!(
            "Fewest-Missing".parse::<SortMode>().unwrap(),
            SortMode::FewestMissing
        );
        assert_eq!(
            "missedIngredients".parse::<SortMode>().unwrap(),
            SortMode::FewestMissing
        );
        assert_eq!("likes".parse::<SortMode>().unwrap(), SortMode::MostPopular);
        assert!("newest".parse::<SortMode>().is_err());
    }

    #[test]
    fn test_default_filters() {
        let filters = SearchFilters::default();
        assert_eq!(filters.max_missing, 5);
        assert_eq!(filters.sort, SortMode::Relevance);
    }
}
