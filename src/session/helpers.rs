// ABOUTME: Display helpers for amounts, HTML summaries, truncation, and CDN image URLs
// ABOUTME: Pure string functions shared by the renderer and the detail gallery
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Receepee Contributors

use crate::constants::api::{INGREDIENT_IMAGE_BASE, RECIPE_IMAGE_BASE};
use crate::models::RecipeId;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Sizes the recipe image CDN serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecipeImageSize {
    /// 312x231
    Small,
    /// 480x360
    #[default]
    Medium,
    /// 556x370
    Large,
    /// 636x393
    ExtraLarge,
}

impl RecipeImageSize {
    /// Dimensions as they appear in the CDN file name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Small => "312x231",
            Self::Medium => "480x360",
            Self::Large => "556x370",
            Self::ExtraLarge => "636x393",
        }
    }
}

impl fmt::Display for RecipeImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// "2 cups", "0.33 tsp"; whole amounts print without decimals
#[must_use]
pub fn format_ingredient_amount(amount: f64, unit: &str) -> String {
    let formatted = if amount.fract().abs() < f64::EPSILON {
        format!("{amount:.0}")
    } else {
        format!("{amount:.2}")
    };
    format!("{formatted} {unit}").trim().to_owned()
}

/// Anything between `<` and the next `>`
fn html_tag_regex() -> Option<&'static Regex> {
    static HTML_TAG_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    HTML_TAG_REGEX
        .get_or_init(|| Regex::new(r"<[^>]*>").ok())
        .as_ref()
}

/// Remove anything that looks like an HTML tag
#[must_use]
pub fn strip_html_tags(html: &str) -> String {
    html_tag_regex().map_or_else(
        || html.to_owned(),
        |re| re.replace_all(html, "").into_owned(),
    )
}

/// Cut `text` to `max_chars` characters and append "..." when shortened
#[must_use]
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim())
}

/// CDN URL of an ingredient thumbnail
///
/// Search results sometimes carry absolute URLs already; those pass through.
#[must_use]
pub fn ingredient_image_url(image_name: &str) -> String {
    if image_name.starts_with("http://") || image_name.starts_with("https://") {
        return image_name.to_owned();
    }
    format!("{INGREDIENT_IMAGE_BASE}/{image_name}")
}

/// CDN URL of a recipe image at the requested size
#[must_use]
pub fn recipe_image_url(recipe_id: RecipeId, size: RecipeImageSize) -> String {
    format!("{RECIPE_IMAGE_BASE}/{recipe_id}-{size}.jpg")
}
