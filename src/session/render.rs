// ABOUTME: Plain-text rendering of the session view and the recipe detail overlay
// ABOUTME: Pure functions from session state to the text printed on the terminal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Receepee Contributors

use super::helpers::{format_ingredient_amount, strip_html_tags, truncate_text};
use super::ingredients::quick_add;
use super::state::{DetailOverlay, DetailTab, Phase, SessionState};
use crate::constants::detail::SUMMARY_PREVIEW_CHARS;
use crate::constants::search::max_missing_label;
use crate::models::{RecipeDetail, RecipeIngredient, RecipeSummary};
use std::fmt::Write;

/// Render the main view followed by the detail overlay when one is open
#[must_use]
pub fn render_session(state: &SessionState) -> String {
    let mut out = String::new();
    render_ingredients(&mut out, state);
    out.push('\n');

    match state.phase() {
        Phase::Empty => {
            out.push_str("Ready to Cook Something?\n");
            out.push_str(
                "Tell us what ingredients you have in your kitchen, and we'll find recipes you can make right now.\n",
            );
        }
        Phase::AwaitingResults => out.push_str("Finding delicious recipes for you...\n"),
        Phase::Failed => {
            out.push_str("Failed to fetch recipes\n");
            if let Some(error) = &state.search.error {
                let _ = writeln!(out, "{}", error.message);
            }
            out.push_str("Type 'retry' to try again.\n");
        }
        Phase::Results | Phase::ResultsEmpty => render_results(&mut out, state),
    }

    if let Some(detail) = &state.detail {
        out.push('\n');
        out.push_str(&render_detail(detail));
    }
    out
}

fn render_ingredients(out: &mut String, state: &SessionState) {
    if state.ingredients.is_empty() {
        out.push_str("What ingredients do you have?\n");
        let quick: Vec<String> = quick_add(&state.ingredients)
            .into_iter()
            .map(|s| format!("+ {s}"))
            .collect();
        let _ = writeln!(out, "Quick add: {}", quick.join("  "));
        return;
    }

    let tags: Vec<String> = state.ingredients.iter().map(|t| format!("[{t}]")).collect();
    let _ = writeln!(
        out,
        "Your ingredients ({}): {}",
        state.ingredients.len(),
        tags.join(" ")
    );
}

fn render_results(out: &mut String, state: &SessionState) {
    let total = state.all_recipes().len();
    let visible = state.visible_recipes();

    if total > 0 {
        let _ = writeln!(
            out,
            "Max missing: {} | Sort: {} | Showing {} of {} recipes",
            max_missing_label(state.filters.max_missing),
            state.filters.sort.label(),
            visible.len(),
            total
        );
    }

    if visible.is_empty() {
        if total > 0 {
            out.push_str("No matching recipes\n");
            out.push_str("Try increasing the maximum missing ingredients to see more results.\n");
        } else {
            out.push_str("No recipes found\n");
            out.push_str("Try adding different ingredients to discover more recipes.\n");
        }
        return;
    }

    let selected = state.detail.as_ref().map(DetailOverlay::recipe_id);
    for (index, recipe) in visible.iter().enumerate() {
        let marker = if selected == Some(recipe.id) { '*' } else { ' ' };
        let _ = writeln!(out, "{marker}{:>3}. {}", index + 1, recipe_card(recipe));
    }
}

fn recipe_card(recipe: &RecipeSummary) -> String {
    let mut card = format!(
        "{} - {}% match, {} used, {} missing",
        recipe.title,
        recipe.match_percentage(),
        recipe.used_ingredient_count,
        recipe.missed_ingredient_count
    );
    if let Some(likes) = recipe.likes {
        let _ = write!(card, ", {likes} likes");
    }
    card
}

/// Render the detail overlay
#[must_use]
pub fn render_detail(overlay: &DetailOverlay) -> String {
    let recipe = &overlay.recipe;
    let mut out = String::new();

    let _ = writeln!(out, "=== {} ===", recipe.title);
    let _ = writeln!(out, "Image: {}", overlay.main_image);
    for (index, image) in overlay.gallery().iter().enumerate() {
        let marker = if *image == overlay.main_image { '*' } else { ' ' };
        let _ = writeln!(out, " {marker}[{}] {image}", index + 1);
    }

    let _ = write!(out, "{} ingredients you have", recipe.used_ingredient_count);
    if recipe.missed_ingredient_count > 0 {
        let _ = write!(out, " | {} ingredients needed", recipe.missed_ingredient_count);
    }
    out.push('\n');

    let details = overlay.query.data.as_ref();
    if let Some(details) = details {
        render_detail_stats(&mut out, details);
    }

    if overlay.query.is_loading() {
        out.push_str("Loading recipe details...\n");
        return out;
    }
    if let Some(error) = &overlay.query.error {
        let _ = writeln!(out, "Failed to load recipe details: {}", error.message);
        out.push_str("Type 'retry' to try again.\n");
        return out;
    }

    let tabs = [DetailTab::Ingredients, DetailTab::Instructions]
        .iter()
        .map(|tab| {
            if *tab == overlay.tab {
                format!("[{tab}]")
            } else {
                format!(" {tab} ")
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    let _ = writeln!(out, "{tabs}");

    match overlay.tab {
        DetailTab::Ingredients => render_ingredient_tab(&mut out, recipe, details),
        DetailTab::Instructions => render_instruction_tab(&mut out, details),
    }

    if let Some(details) = details {
        if !details.summary.is_empty() {
            let summary = strip_html_tags(&details.summary);
            let _ = writeln!(
                out,
                "\nAbout: {}",
                truncate_text(&summary, SUMMARY_PREVIEW_CHARS)
            );
        }
        if let Some(url) = &details.source_url {
            let _ = writeln!(out, "View original recipe: {url}");
        }
    }
    out
}

fn render_detail_stats(out: &mut String, details: &RecipeDetail) {
    let _ = write!(
        out,
        "{} mins | {} servings",
        details.ready_in_minutes, details.servings
    );
    if let Some(score) = details.health_score.filter(|score| *score > 0.0) {
        let _ = write!(out, " | Health: {score}%");
    }
    out.push('\n');

    let labels = details.dietary_labels();
    if !labels.is_empty() {
        let _ = writeln!(out, "Diet: {}", labels.join(", "));
    }
}

fn render_ingredient_list(out: &mut String, heading: &str, ingredients: &[RecipeIngredient]) {
    let _ = writeln!(out, "{heading}:");
    for ingredient in ingredients {
        let _ = writeln!(
            out,
            "  - {} ({})",
            ingredient.name,
            format_ingredient_amount(ingredient.amount, &ingredient.unit)
        );
    }
}

fn render_ingredient_tab(out: &mut String, recipe: &RecipeSummary, details: Option<&RecipeDetail>) {
    render_ingredient_list(out, "Ingredients You Have", &recipe.used_ingredients);
    if !recipe.missed_ingredients.is_empty() {
        render_ingredient_list(out, "Ingredients You Need", &recipe.missed_ingredients);
    }
    if let Some(details) = details.filter(|d| !d.extended_ingredients.is_empty()) {
        out.push_str("Full Ingredient List:\n");
        for ingredient in &details.extended_ingredients {
            let _ = writeln!(out, "  - {}", ingredient.original);
        }
    }
}

fn render_instruction_tab(out: &mut String, details: Option<&RecipeDetail>) {
    let steps = details
        .and_then(|d| d.analyzed_instructions.first())
        .map(|block| block.steps.as_slice())
        .filter(|steps| !steps.is_empty());

    if let Some(steps) = steps {
        for step in steps {
            let _ = writeln!(out, "  {}. {}", step.number, step.step);
            if let Some(length) = &step.length {
                let _ = writeln!(out, "     ({} {})", length.number, length.unit);
            }
        }
        return;
    }

    match details.and_then(|d| d.instructions.as_deref()) {
        Some(text) if !text.trim().is_empty() => {
            let _ = writeln!(out, "{}", strip_html_tags(text));
        }
        _ => {
            out.push_str("No detailed instructions available for this recipe.\n");
            if let Some(url) = details.and_then(|d| d.source_url.as_deref()) {
                let _ = writeln!(out, "View full recipe on source website: {url}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::models::{AnalyzedInstruction, InstructionStep};
    use crate::queries::QueryResult;
    use crate::session::state::{reduce, Event};

    fn recipe(id: u64, missing: u32) -> RecipeSummary {
        RecipeSummary {
            id,
            title: format!("Dish {id}"),
            image: format!("https://img.example/{id}.jpg"),
            used_ingredient_count: 2,
            missed_ingredient_count: missing,
            ..RecipeSummary::default()
        }
    }

    fn run(events: Vec<Event>) -> SessionState {
        events
            .into_iter()
            .fold(SessionState::default(), |state, event| reduce(state, event).state)
    }

    #[test]
    fn test_empty_view_offers_quick_add() {
        let text = render_session(&SessionState::default());
        assert!(text.contains("What ingredients do you have?"));
        assert!(text.contains("+ chicken"));
        assert!(text.contains("Ready to Cook Something?"));
    }

    #[test]
    fn test_loading_view() {
        let text = render_session(&run(vec![Event::AddIngredient("rice".into())]));
        assert!(text.contains("Your ingredients (1): [rice]"));
        assert!(text.contains("Finding delicious recipes for you..."));
    }

    #[test]
    fn test_results_show_filter_summary_and_cards() {
        let state = run(vec![
            Event::AddIngredient("rice".into()),
            Event::SearchResolved {
                ingredients: vec!["rice".into()],
                result: QueryResult::success(vec![recipe(1, 0), recipe(2, 2), recipe(3, 6)]),
            },
        ]);
        let text = render_session(&state);
        assert!(text.contains("Showing 2 of 3 recipes"));
        assert!(text.contains("1. Dish 1 - 100% match"));
        assert!(text.contains("2. Dish 2 - 50% match"));
        assert!(!text.contains("Dish 3"));
    }

    #[test]
    fn test_filtered_out_view_and_empty_results_differ() {
        let filtered_out = run(vec![
            Event::AddIngredient("rice".into()),
            Event::SetMaxMissing(0),
            Event::SearchResolved {
                ingredients: vec!["rice".into()],
                result: QueryResult::success(vec![recipe(1, 3)]),
            },
        ]);
        let text = render_session(&filtered_out);
        assert!(text.contains("Showing 0 of 1 recipes"));
        assert!(text.contains("No matching recipes"));

        let nothing = run(vec![
            Event::AddIngredient("rice".into()),
            Event::SearchResolved {
                ingredients: vec!["rice".into()],
                result: QueryResult::success(Vec::new()),
            },
        ]);
        let text = render_session(&nothing);
        assert!(!text.contains("Showing"));
        assert!(text.contains("No recipes found"));
    }

    #[test]
    fn test_error_view_offers_retry() {
        let state = run(vec![
            Event::AddIngredient("rice".into()),
            Event::SearchResolved {
                ingredients: vec!["rice".into()],
                result: QueryResult::failed(AppError::from_upstream(402, "Payment Required"), None),
            },
        ]);
        let text = render_session(&state);
        assert!(text.contains("Failed to fetch recipes"));
        assert!(text.contains("API Error: 402 - Payment Required"));
        assert!(text.contains("retry"));
    }

    #[test]
    fn test_detail_tabs() {
        let details = RecipeDetail {
            id: 5,
            title: "Dish 5".into(),
            ready_in_minutes: 25,
            servings: 2,
            vegan: true,
            summary: "<b>Tasty</b> and quick".into(),
            analyzed_instructions: vec![AnalyzedInstruction {
                name: String::new(),
                steps: vec![InstructionStep {
                    number: 1,
                    step: "Boil the rice.".into(),
                    ..InstructionStep::default()
                }],
            }],
            ..RecipeDetail::default()
        };
        let state = run(vec![
            Event::OpenRecipe(recipe(5, 1)),
            Event::DetailResolved {
                recipe_id: 5,
                result: QueryResult::success(details),
            },
        ]);

        let overlay = state.detail.as_ref().map(render_detail).unwrap_or_default();
        assert!(overlay.contains("=== Dish 5 ==="));
        assert!(overlay.contains("25 mins | 2 servings"));
        assert!(overlay.contains("Diet: Vegan"));
        assert!(overlay.contains("[Ingredients]"));
        assert!(overlay.contains("Ingredients You Have:"));
        assert!(overlay.contains("About: Tasty and quick"));

        let steps = reduce(state, Event::SelectTab(DetailTab::Instructions)).state;
        let overlay = steps.detail.as_ref().map(render_detail).unwrap_or_default();
        assert!(overlay.contains("[Instructions]"));
        assert!(overlay.contains("1. Boil the rice."));
    }

    #[test]
    fn test_detail_loading() {
        let state = run(vec![Event::OpenRecipe(recipe(8, 0))]);
        let overlay = state.detail.as_ref().map(render_detail).unwrap_or_default();
        assert!(overlay.contains("Loading recipe details..."));
    }
}
