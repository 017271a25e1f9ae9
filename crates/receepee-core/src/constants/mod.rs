// ABOUTME: Constants module with domain-separated organization
// ABOUTME: API endpoints, cache windows, search sizing, and the ingredient vocabulary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Receepee Contributors

//! Constants module
//!
//! Constants are grouped by domain rather than kept in a single flat list.

/// Service identity
pub mod service_names {
    /// Name used for logging and the CLI
    pub const RECEEPEE: &str = "receepee";
    /// Upstream service label used in error messages
    pub const SPOONACULAR_API: &str = "Spoonacular API";
}

/// Upstream recipe API
pub mod api {
    /// Default base URL of the recipe-matching API
    pub const DEFAULT_BASE_URL: &str = "https://api.spoonacular.com";
    /// Placeholder key used when none is configured
    pub const DEFAULT_API_KEY: &str = "demo";
    /// Environment variable holding the API key
    pub const API_KEY_ENV: &str = "SPOONACULAR_API_KEY";
    /// Legacy environment variable name honoured as a fallback
    pub const LEGACY_API_KEY_ENV: &str = "VITE_SPOONACULAR_API_KEY";
    /// Environment variable overriding the base URL
    pub const BASE_URL_ENV: &str = "SPOONACULAR_BASE_URL";
    /// Environment variable enabling an explicit request timeout
    pub const TIMEOUT_ENV: &str = "SPOONACULAR_TIMEOUT_SECS";

    /// Search-by-ingredients path
    pub const FIND_BY_INGREDIENTS_PATH: &str = "/recipes/findByIngredients";
    /// Random recipes path
    pub const RANDOM_PATH: &str = "/recipes/random";

    /// Default result count of a bare search-by-ingredients call
    pub const DEFAULT_SEARCH_NUMBER: u32 = 20;
    /// Default count of a random-recipes call
    pub const DEFAULT_RANDOM_NUMBER: u32 = 12;
    /// Upper bound the upstream API accepts for `number`
    pub const MAX_RESULTS_PER_REQUEST: u32 = 100;

    /// CDN prefix for ingredient thumbnails
    pub const INGREDIENT_IMAGE_BASE: &str = "https://spoonacular.com/cdn/ingredients_100x100";
    /// CDN prefix for recipe images
    pub const RECIPE_IMAGE_BASE: &str = "https://spoonacular.com/recipeImages";
}

/// Query cache freshness and retention windows
pub mod cache {
    /// Search results are fresh for 5 minutes
    pub const SEARCH_STALE_SECS: u64 = 5 * 60;
    /// Unused search results are kept for 30 minutes
    pub const SEARCH_RETENTION_SECS: u64 = 30 * 60;
    /// Recipe details are fresh for 10 minutes
    pub const DETAIL_STALE_SECS: u64 = 10 * 60;
    /// Unused recipe details are kept for 1 hour
    pub const DETAIL_RETENTION_SECS: u64 = 60 * 60;
    /// Maximum number of cached queries
    pub const DEFAULT_MAX_ENTRIES: usize = 256;
    /// Interval of the background purge of unused entries
    pub const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 60;
}

/// Search sizing and filter panel settings
pub mod search {
    /// Highest max-missing threshold the filter panel offers
    pub const MAX_MISSING_CEILING: u32 = 10;

    /// Selectable max-missing thresholds, in panel order
    pub const MAX_MISSING_OPTIONS: [u32; 6] = [0, 1, 2, 3, 5, MAX_MISSING_CEILING];

    /// Default max-missing threshold
    pub const DEFAULT_MAX_MISSING: u32 = 5;

    /// Number of recipes a session requests for every ingredient set.
    ///
    /// Filtering happens locally over this fixed set, so it must stay generous
    /// relative to the widest threshold the panel offers. The assertion below
    /// keeps the two values from drifting apart.
    pub const SESSION_RESULT_COUNT: u32 = 24;

    const _: () = assert!(SESSION_RESULT_COUNT > MAX_MISSING_CEILING);

    /// Sessions let the API ignore typical pantry staples (water, salt, flour)
    pub const SESSION_IGNORE_PANTRY: bool = true;

    /// Label shown for a threshold option in the filter panel
    #[must_use]
    pub fn max_missing_label(threshold: u32) -> String {
        match threshold {
            0 => "0 (exact match)".to_owned(),
            1 => "1 ingredient".to_owned(),
            MAX_MISSING_CEILING => format!("{MAX_MISSING_CEILING}+ ingredients"),
            n => format!("{n} ingredients"),
        }
    }
}

/// Ingredient suggestions
pub mod suggestions {
    /// Fixed vocabulary the input box suggests from
    pub const SUGGESTED_INGREDIENTS: [&str; 17] = [
        "chicken",
        "rice",
        "pasta",
        "tomato",
        "onion",
        "garlic",
        "beef",
        "cheese",
        "egg",
        "potato",
        "carrot",
        "broccoli",
        "salmon",
        "shrimp",
        "mushroom",
        "spinach",
        "bell pepper",
    ];

    /// How many suggestions the quick-add row shows while no ingredient is entered
    pub const QUICK_ADD_COUNT: usize = 8;
}

/// Detail view
pub mod detail {
    /// Number of used-ingredient images added to the detail gallery
    pub const GALLERY_INGREDIENT_IMAGES: usize = 4;
    /// Summary text is truncated to this many characters in the detail view
    pub const SUMMARY_PREVIEW_CHARS: usize = 500;
}
