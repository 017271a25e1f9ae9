// ABOUTME: Recipe payload models for search-by-ingredients, recipe details, and random recipes
// ABOUTME: Field names follow the upstream camelCase JSON; absent fields fall back to defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Receepee Contributors

use serde::{Deserialize, Serialize};

/// Upstream recipe identifier
pub type RecipeId = u64;

/// Ingredient record attached to a search match (used, missed, or unused)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeIngredient {
    /// Ingredient identifier
    pub id: u64,
    /// Quantity
    pub amount: f64,
    /// Unit as written in the recipe
    pub unit: String,
    /// Long unit name ("tablespoons")
    pub unit_long: String,
    /// Short unit name ("Tbsp")
    pub unit_short: String,
    /// Supermarket aisle
    pub aisle: Option<String>,
    /// Normalized ingredient name
    pub name: String,
    /// Full original line ("2 cups cooked rice")
    pub original: String,
    /// Ingredient name as written
    pub original_name: String,
    /// Preparation notes ("chopped", "fresh")
    pub meta: Vec<String>,
    /// Image file name or absolute URL
    pub image: String,
}

/// Lightweight match result returned by search-by-ingredients
///
/// Immutable once received; the matching counts are computed upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeSummary {
    /// Recipe identifier
    pub id: RecipeId,
    /// Title
    pub title: String,
    /// Image URL
    pub image: String,
    /// Image file type ("jpg")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_type: Option<String>,
    /// Number of the user's ingredients the recipe uses
    pub used_ingredient_count: u32,
    /// Number of ingredients the user is missing
    pub missed_ingredient_count: u32,
    /// Ingredients the user is missing
    pub missed_ingredients: Vec<RecipeIngredient>,
    /// Ingredients from the user's pantry the recipe uses
    pub used_ingredients: Vec<RecipeIngredient>,
    /// User ingredients the recipe does not use
    pub unused_ingredients: Vec<RecipeIngredient>,
    /// Popularity score; may be absent upstream
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes: Option<u32>,
}

impl RecipeSummary {
    /// Popularity score with an absent value counted as zero
    #[must_use]
    pub fn popularity(&self) -> u32 {
        self.likes.unwrap_or(0)
    }

    /// Share of the recipe's ingredients the user already has, in percent
    #[must_use]
    pub fn match_percentage(&self) -> u32 {
        let total = self.used_ingredient_count + self.missed_ingredient_count;
        if total == 0 {
            return 0;
        }
        ((f64::from(self.used_ingredient_count) / f64::from(total)) * 100.0).round() as u32
    }
}

/// Amount expressed in one unit system
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Measure {
    /// Quantity
    pub amount: f64,
    /// Short unit name
    pub unit_short: String,
    /// Long unit name
    pub unit_long: String,
}

/// US and metric measures of one ingredient
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Measures {
    /// US customary units
    pub us: Measure,
    /// Metric units
    pub metric: Measure,
}

/// Ingredient line of a full recipe
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtendedIngredient {
    /// Ingredient identifier
    pub id: u64,
    /// Supermarket aisle
    pub aisle: Option<String>,
    /// Image file name
    pub image: Option<String>,
    /// "SOLID" or "LIQUID"
    pub consistency: Option<String>,
    /// Ingredient name
    pub name: String,
    /// Cleaned ingredient name
    pub name_clean: Option<String>,
    /// Full original line
    pub original: String,
    /// Ingredient name as written
    pub original_name: String,
    /// Quantity
    pub amount: f64,
    /// Unit
    pub unit: String,
    /// Preparation notes
    pub meta: Vec<String>,
    /// Converted measures
    pub measures: Measures,
}

/// Ingredient or equipment referenced by an instruction step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StepItem {
    /// Identifier
    pub id: u64,
    /// Name
    pub name: String,
    /// Localized name
    pub localized_name: String,
    /// Image file name
    pub image: String,
}

/// Duration attached to an instruction step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepLength {
    /// Quantity
    pub number: u32,
    /// Unit ("minutes")
    pub unit: String,
}

/// One numbered step of the instructions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstructionStep {
    /// Step number, 1-based
    pub number: u32,
    /// Step text
    pub step: String,
    /// Ingredients used in this step
    pub ingredients: Vec<StepItem>,
    /// Equipment used in this step
    pub equipment: Vec<StepItem>,
    /// Time the step takes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<StepLength>,
}

/// Named block of structured instructions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzedInstruction {
    /// Block name, often empty
    pub name: String,
    /// Steps in order
    pub steps: Vec<InstructionStep>,
}

/// Full recipe information, fetched lazily when a recipe is opened
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(clippy::struct_excessive_bools)] // Mirrors the upstream dietary flags one-to-one
pub struct RecipeDetail {
    pub id: RecipeId,
    pub title: String,
    pub image: Option<String>,
    pub servings: u32,
    pub ready_in_minutes: u32,
    pub source_name: Option<String>,
    pub source_url: Option<String>,
    pub spoonacular_score: Option<f64>,
    pub health_score: Option<f64>,
    pub price_per_serving: Option<f64>,
    pub cheap: bool,
    pub credits_text: Option<String>,
    pub dairy_free: bool,
    pub gaps: Option<String>,
    pub gluten_free: bool,
    /// Free-text instructions, may contain HTML
    pub instructions: Option<String>,
    pub ketogenic: bool,
    pub low_fodmap: bool,
    pub sustainable: bool,
    pub vegan: bool,
    pub vegetarian: bool,
    pub very_healthy: bool,
    pub very_popular: bool,
    pub whole30: bool,
    pub weight_watcher_smart_points: Option<u32>,
    pub dish_types: Vec<String>,
    pub extended_ingredients: Vec<ExtendedIngredient>,
    /// Free-text summary, contains HTML markup
    pub summary: String,
    pub cuisines: Vec<String>,
    pub diets: Vec<String>,
    pub occasions: Vec<String>,
    pub analyzed_instructions: Vec<AnalyzedInstruction>,
}

impl RecipeDetail {
    /// Labels of the dietary flags that are set, in display order
    #[must_use]
    pub fn dietary_labels(&self) -> Vec<&'static str> {
        [
            (self.vegetarian, "Vegetarian"),
            (self.vegan, "Vegan"),
            (self.gluten_free, "Gluten Free"),
            (self.dairy_free, "Dairy Free"),
            (self.ketogenic, "Ketogenic"),
            (self.low_fodmap, "Low FODMAP"),
            (self.whole30, "Whole30"),
            (self.very_healthy, "Very Healthy"),
            (self.cheap, "Budget Friendly"),
        ]
        .into_iter()
        .filter_map(|(set, label)| set.then_some(label))
        .collect()
    }

    /// All structured steps, flattened across instruction blocks
    pub fn steps(&self) -> impl Iterator<Item = &InstructionStep> {
        self.analyzed_instructions
            .iter()
            .flat_map(|block| block.steps.iter())
    }
}

/// Envelope of the random-recipes endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomRecipesResponse {
    /// Returned recipes
    pub recipes: Vec<RecipeDetail>,
}
