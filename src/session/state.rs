// ABOUTME: Session state, events, effects, and the pure transition function
// ABOUTME: Models the ingredient search flow and the recipe detail overlay without any I/O
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Receepee Contributors

//! Session state machine
//!
//! [`reduce`] maps `(state, event)` to the next state plus the [`Effect`]s the
//! driver must run. Effects resolve into `SearchResolved` / `DetailResolved`
//! events that are fed back through [`reduce`]. A resolution for an ingredient
//! list or recipe that is no longer current is discarded.

use super::helpers::ingredient_image_url;
use super::ingredients::IngredientSet;
use crate::constants::detail::GALLERY_INGREDIENT_IMAGES;
use crate::errors::AppError;
use crate::external::SearchByIngredientsParams;
use crate::filtering::apply_filters;
use crate::models::{RecipeDetail, RecipeId, RecipeSummary, SearchFilters, SortMode};
use crate::queries::QueryResult;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Main view phase, derived from the state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No ingredients entered
    Empty,
    /// Ingredients present, fetch in flight, no data yet
    AwaitingResults,
    /// Filtered results available
    Results,
    /// Results fetched but the filter leaves none
    ResultsEmpty,
    /// The most recent search failed
    Failed,
}

/// Loading, error, and data of one query as the session tracks it
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySlot<T> {
    /// Last known data
    pub data: Option<T>,
    /// Failure of the most recent fetch
    pub error: Option<AppError>,
    /// Whether a fetch is in flight
    pub is_fetching: bool,
}

impl<T> Default for QuerySlot<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            is_fetching: false,
        }
    }
}

impl<T> QuerySlot<T> {
    fn fetching() -> Self {
        Self {
            is_fetching: true,
            ..Self::default()
        }
    }

    fn resolve(&mut self, result: QueryResult<T>) {
        self.data = result.data;
        self.error = result.error;
        self.is_fetching = false;
    }

    fn start_retry(&mut self) {
        self.error = None;
        self.is_fetching = true;
    }

    /// True only while no data exists yet and a fetch is in flight
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.data.is_none() && self.is_fetching
    }
}

/// Tab of the detail overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailTab {
    /// Used, missing, and full ingredient lists
    #[default]
    Ingredients,
    /// Step-by-step instructions
    Instructions,
}

impl fmt::Display for DetailTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ingredients => write!(f, "Ingredients"),
            Self::Instructions => write!(f, "Instructions"),
        }
    }
}

impl FromStr for DetailTab {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ingredients" | "i" => Ok(Self::Ingredients),
            "instructions" | "steps" | "s" => Ok(Self::Instructions),
            other => Err(AppError::invalid_input(format!(
                "Unknown detail tab '{other}', expected ingredients or instructions"
            ))),
        }
    }
}

/// Recipe detail overlay, independent of the main search flow
#[derive(Debug, Clone, PartialEq)]
pub struct DetailOverlay {
    /// Summary the overlay was opened from
    pub recipe: RecipeSummary,
    /// Detail query for the recipe
    pub query: QuerySlot<RecipeDetail>,
    /// Active tab
    pub tab: DetailTab,
    /// Image shown large, one of [`DetailOverlay::gallery`]
    pub main_image: String,
}

impl DetailOverlay {
    fn open(recipe: RecipeSummary) -> Self {
        let main_image = recipe.image.clone();
        Self {
            recipe,
            query: QuerySlot::fetching(),
            tab: DetailTab::default(),
            main_image,
        }
    }

    /// Id of the recipe shown
    #[must_use]
    pub const fn recipe_id(&self) -> RecipeId {
        self.recipe.id
    }

    /// Recipe image followed by the first used-ingredient thumbnails
    #[must_use]
    pub fn gallery(&self) -> Vec<String> {
        std::iter::once(self.recipe.image.clone())
            .chain(
                self.recipe
                    .used_ingredients
                    .iter()
                    .take(GALLERY_INGREDIENT_IMAGES)
                    .map(|ingredient| ingredient_image_url(&ingredient.image)),
            )
            .collect()
    }
}

/// Whole session state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    /// Ingredients entered so far
    pub ingredients: IngredientSet,
    /// Local filter and sort settings
    pub filters: SearchFilters,
    /// Search query for the current ingredient list
    pub search: QuerySlot<Vec<RecipeSummary>>,
    /// Open recipe detail, if any
    pub detail: Option<DetailOverlay>,
}

impl SessionState {
    /// Current phase of the main view
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.ingredients.is_empty() {
            return Phase::Empty;
        }
        if self.search.error.is_some() {
            return Phase::Failed;
        }
        match &self.search.data {
            None => Phase::AwaitingResults,
            Some(_) if self.visible_recipes().is_empty() => Phase::ResultsEmpty,
            Some(_) => Phase::Results,
        }
    }

    /// Search request for the current ingredient list
    #[must_use]
    pub fn search_params(&self) -> SearchByIngredientsParams {
        SearchByIngredientsParams::for_session(self.ingredients.as_slice().to_vec())
    }

    /// Every recipe of the last search, unfiltered
    #[must_use]
    pub fn all_recipes(&self) -> &[RecipeSummary] {
        self.search.data.as_deref().unwrap_or_default()
    }

    /// Recipes after the local filter and sort
    #[must_use]
    pub fn visible_recipes(&self) -> Vec<RecipeSummary> {
        apply_filters(self.all_recipes(), &self.filters)
    }

    /// Visible recipe at a 1-based position
    #[must_use]
    pub fn recipe_at(&self, position: usize) -> Option<RecipeSummary> {
        position
            .checked_sub(1)
            .and_then(|index| self.visible_recipes().into_iter().nth(index))
    }
}

/// Something that happened in the session
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Raw ingredient input
    AddIngredient(String),
    /// Several raw ingredients entered at once; searches once for the combined list
    AddIngredients(Vec<String>),
    /// Remove one ingredient
    RemoveIngredient(String),
    /// Remove every ingredient
    ClearIngredients,
    /// Change the max-missing threshold
    SetMaxMissing(u32),
    /// Change the sort order
    SetSort(SortMode),
    /// Re-issue the failed search
    Retry,
    /// Open the detail overlay for a recipe
    OpenRecipe(RecipeSummary),
    /// Close the detail overlay
    CloseDetail,
    /// Switch the detail tab
    SelectTab(DetailTab),
    /// Show a gallery image (0-based) large
    SelectImage(usize),
    /// Re-issue the failed detail fetch
    RetryDetail,
    /// A search finished
    SearchResolved {
        /// Ingredient list the request was issued for
        ingredients: Vec<String>,
        /// Outcome
        result: QueryResult<Vec<RecipeSummary>>,
    },
    /// A detail fetch finished
    DetailResolved {
        /// Recipe the request was issued for
        recipe_id: RecipeId,
        /// Outcome
        result: QueryResult<RecipeDetail>,
    },
}

/// Work the driver performs on behalf of [`reduce`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch search results, served from cache while fresh
    FetchSearch(SearchByIngredientsParams),
    /// Fetch search results ignoring freshness
    RefetchSearch(SearchByIngredientsParams),
    /// Fetch recipe detail, served from cache while fresh
    FetchDetail(RecipeId),
    /// Fetch recipe detail ignoring freshness
    RefetchDetail(RecipeId),
}

/// Next state and the effects it requires
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// State after the event
    pub state: SessionState,
    /// Effects to run, in order
    pub effects: Vec<Effect>,
}

impl Transition {
    const fn idle(state: SessionState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }
}

/// Apply `event` to `state`
#[must_use]
pub fn reduce(mut state: SessionState, event: Event) -> Transition {
    match event {
        Event::AddIngredient(raw) => {
            if !state.ingredients.add(&raw) {
                return Transition::idle(state);
            }
            search_current(state)
        }
        Event::AddIngredients(raws) => {
            let mut changed = false;
            for raw in &raws {
                changed |= state.ingredients.add(raw);
            }
            if !changed {
                return Transition::idle(state);
            }
            search_current(state)
        }
        Event::RemoveIngredient(raw) => {
            if !state.ingredients.remove(&raw) {
                return Transition::idle(state);
            }
            if state.ingredients.is_empty() {
                return Transition::idle(reset(state));
            }
            search_current(state)
        }
        Event::ClearIngredients => Transition::idle(reset(state)),
        Event::SetMaxMissing(max_missing) => {
            state.filters.max_missing = max_missing;
            Transition::idle(state)
        }
        Event::SetSort(sort) => {
            state.filters.sort = sort;
            Transition::idle(state)
        }
        Event::Retry => {
            if state.phase() != Phase::Failed {
                return Transition::idle(state);
            }
            state.search.start_retry();
            let params = state.search_params();
            Transition {
                state,
                effects: vec![Effect::RefetchSearch(params)],
            }
        }
        Event::OpenRecipe(recipe) => {
            let recipe_id = recipe.id;
            state.detail = Some(DetailOverlay::open(recipe));
            Transition {
                state,
                effects: vec![Effect::FetchDetail(recipe_id)],
            }
        }
        Event::CloseDetail => {
            state.detail = None;
            Transition::idle(state)
        }
        Event::SelectTab(tab) => {
            if let Some(detail) = state.detail.as_mut() {
                detail.tab = tab;
            }
            Transition::idle(state)
        }
        Event::SelectImage(index) => {
            if let Some(detail) = state.detail.as_mut() {
                if let Some(image) = detail.gallery().into_iter().nth(index) {
                    detail.main_image = image;
                }
            }
            Transition::idle(state)
        }
        Event::RetryDetail => {
            let failed = state
                .detail
                .as_ref()
                .is_some_and(|detail| detail.query.error.is_some());
            match state.detail.as_mut() {
                Some(detail) if failed => {
                    detail.query.start_retry();
                    let recipe_id = detail.recipe_id();
                    Transition {
                        state,
                        effects: vec![Effect::RefetchDetail(recipe_id)],
                    }
                }
                _ => Transition::idle(state),
            }
        }
        Event::SearchResolved {
            ingredients,
            result,
        } => {
            if ingredients.as_slice() != state.ingredients.as_slice() {
                debug!(?ingredients, "Discarding search result for superseded ingredients");
                return Transition::idle(state);
            }
            state.search.resolve(result);
            Transition::idle(state)
        }
        Event::DetailResolved { recipe_id, result } => {
            match state
                .detail
                .as_mut()
                .filter(|detail| detail.recipe_id() == recipe_id)
            {
                Some(detail) => detail.query.resolve(result),
                None => debug!(recipe_id, "Discarding detail result for a closed recipe"),
            }
            Transition::idle(state)
        }
    }
}

/// Start a search for the current ingredients, dropping results of the previous list
fn search_current(mut state: SessionState) -> Transition {
    state.search = QuerySlot::fetching();
    let params = state.search_params();
    Transition {
        state,
        effects: vec![Effect::FetchSearch(params)],
    }
}

/// Back to the empty state; closes any open detail
fn reset(mut state: SessionState) -> SessionState {
    state.ingredients.clear();
    state.search = QuerySlot::default();
    state.detail = None;
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecipeIngredient;

    fn recipe(id: u64, missing: u32) -> RecipeSummary {
        RecipeSummary {
            id,
            title: format!("Recipe {id}"),
            image: format!("https://img.example/{id}.jpg"),
            missed_ingredient_count: missing,
            ..RecipeSummary::default()
        }
    }

    fn apply(state: SessionState, events: Vec<Event>) -> SessionState {
        events
            .into_iter()
            .fold(state, |state, event| reduce(state, event).state)
    }

    fn resolved(ingredients: &[&str], recipes: Vec<RecipeSummary>) -> Event {
        Event::SearchResolved {
            ingredients: ingredients.iter().map(|s| (*s).to_owned()).collect(),
            result: QueryResult::success(recipes),
        }
    }

    #[test]
    fn test_first_ingredient_starts_search() {
        let transition = reduce(
            SessionState::default(),
            Event::AddIngredient(" Chicken".into()),
        );
        assert_eq!(transition.state.phase(), Phase::AwaitingResults);
        assert_eq!(
            transition.effects,
            vec![Effect::FetchSearch(SearchByIngredientsParams::for_session(
                vec!["chicken".into()]
            ))]
        );
    }

    #[test]
    fn test_duplicate_or_blank_ingredient_is_a_no_op() {
        let state = apply(
            SessionState::default(),
            vec![Event::AddIngredient("rice".into())],
        );
        for raw in ["RICE ", "   ", ""] {
            let transition = reduce(state.clone(), Event::AddIngredient(raw.into()));
            assert_eq!(transition.state, state);
            assert!(transition.effects.is_empty());
        }
    }

    #[test]
    fn test_batch_add_issues_one_search() {
        let transition = reduce(
            SessionState::default(),
            Event::AddIngredients(vec![
                "Chicken".into(),
                " rice".into(),
                "chicken".into(),
                "  ".into(),
                "egg".into(),
            ]),
        );
        assert_eq!(transition.state.ingredients.as_slice(), ["chicken", "rice", "egg"]);
        assert_eq!(
            transition.effects,
            vec![Effect::FetchSearch(SearchByIngredientsParams::for_session(
                vec!["chicken".into(), "rice".into(), "egg".into()]
            ))]
        );

        let repeat = reduce(
            transition.state.clone(),
            Event::AddIngredients(vec!["EGG".into(), String::new()]),
        );
        assert_eq!(repeat.state, transition.state);
        assert!(repeat.effects.is_empty());
    }

    #[test]
    fn test_resolution_moves_to_results_or_results_empty() {
        let state = apply(
            SessionState::default(),
            vec![
                Event::AddIngredient("chicken".into()),
                Event::AddIngredient("rice".into()),
                resolved(
                    &["chicken", "rice"],
                    vec![recipe(1, 0), recipe(2, 2), recipe(3, 6)],
                ),
            ],
        );
        assert_eq!(state.phase(), Phase::Results);
        assert_eq!(
            state.visible_recipes().iter().map(|r| r.id).collect::<Vec<_>>(),
            [1, 2]
        );

        let narrowed = reduce(state, Event::SetMaxMissing(0)).state;
        assert_eq!(narrowed.phase(), Phase::Results);
        let none_left = apply(
            narrowed,
            vec![resolved(&["chicken", "rice"], vec![recipe(4, 3)])],
        );
        assert_eq!(none_left.phase(), Phase::ResultsEmpty);
    }

    #[test]
    fn test_filter_change_never_fetches() {
        let state = apply(
            SessionState::default(),
            vec![
                Event::AddIngredient("egg".into()),
                resolved(&["egg"], vec![recipe(1, 1)]),
            ],
        );
        for event in [
            Event::SetMaxMissing(10),
            Event::SetSort(SortMode::MostPopular),
        ] {
            assert!(reduce(state.clone(), event).effects.is_empty());
        }
    }

    #[test]
    fn test_stale_search_resolution_is_discarded() {
        let state = apply(
            SessionState::default(),
            vec![
                Event::AddIngredient("chicken".into()),
                Event::AddIngredient("rice".into()),
            ],
        );
        let after = reduce(state.clone(), resolved(&["chicken"], vec![recipe(9, 0)])).state;
        assert_eq!(after, state);
        assert_eq!(after.phase(), Phase::AwaitingResults);
    }

    #[test]
    fn test_failure_then_retry_reissues_identical_request() {
        let state = apply(
            SessionState::default(),
            vec![
                Event::AddIngredient("chicken".into()),
                Event::SearchResolved {
                    ingredients: vec!["chicken".into()],
                    result: QueryResult::failed(
                        AppError::from_upstream(402, "Payment Required"),
                        None,
                    ),
                },
            ],
        );
        assert_eq!(state.phase(), Phase::Failed);

        let transition = reduce(state.clone(), Event::Retry);
        assert_eq!(
            transition.effects,
            vec![Effect::RefetchSearch(state.search_params())]
        );
        assert_eq!(transition.state.phase(), Phase::AwaitingResults);
    }

    #[test]
    fn test_retry_outside_failed_is_ignored() {
        let state = apply(
            SessionState::default(),
            vec![Event::AddIngredient("chicken".into())],
        );
        assert!(reduce(state, Event::Retry).effects.is_empty());
    }

    #[test]
    fn test_clearing_closes_detail_from_any_state() {
        let base = apply(
            SessionState::default(),
            vec![
                Event::AddIngredient("tomato".into()),
                resolved(&["tomato"], vec![recipe(5, 1)]),
                Event::OpenRecipe(recipe(5, 1)),
            ],
        );
        assert!(base.detail.is_some());

        let cleared = reduce(base.clone(), Event::ClearIngredients).state;
        assert_eq!(cleared.phase(), Phase::Empty);
        assert!(cleared.detail.is_none());
        assert!(cleared.search.data.is_none());

        let removed = reduce(base, Event::RemoveIngredient("TOMATO".into()));
        assert_eq!(removed.state.phase(), Phase::Empty);
        assert!(removed.state.detail.is_none());
        assert!(removed.effects.is_empty());
    }

    #[test]
    fn test_removing_one_of_several_ingredients_searches_again() {
        let state = apply(
            SessionState::default(),
            vec![
                Event::AddIngredient("a".into()),
                Event::AddIngredient("b".into()),
                resolved(&["a", "b"], vec![recipe(1, 0)]),
            ],
        );
        let transition = reduce(state, Event::RemoveIngredient("a".into()));
        assert_eq!(transition.state.phase(), Phase::AwaitingResults);
        assert_eq!(
            transition.effects,
            vec![Effect::FetchSearch(SearchByIngredientsParams::for_session(
                vec!["b".into()]
            ))]
        );
    }

    #[test]
    fn test_detail_overlay_is_independent_of_search() {
        let state = apply(
            SessionState::default(),
            vec![
                Event::AddIngredient("rice".into()),
                resolved(&["rice"], vec![recipe(5, 0)]),
            ],
        );
        let opened = reduce(state.clone(), Event::OpenRecipe(recipe(5, 0)));
        assert_eq!(opened.effects, vec![Effect::FetchDetail(5)]);
        assert!(opened.state.detail.as_ref().is_some_and(|d| d.query.is_loading()));

        let closed = reduce(opened.state, Event::CloseDetail).state;
        assert_eq!(closed, state);
    }

    #[test]
    fn test_detail_resolution_for_closed_recipe_is_discarded() {
        let state = apply(
            SessionState::default(),
            vec![Event::OpenRecipe(recipe(7, 0))],
        );
        let after = reduce(
            state.clone(),
            Event::DetailResolved {
                recipe_id: 8,
                result: QueryResult::success(RecipeDetail::default()),
            },
        )
        .state;
        assert_eq!(after, state);
    }

    #[test]
    fn test_gallery_and_image_selection() {
        let mut summary = recipe(3, 0);
        summary.used_ingredients = (0..6)
            .map(|i| RecipeIngredient {
                image: format!("ing{i}.png"),
                ..RecipeIngredient::default()
            })
            .collect();
        let state = apply(SessionState::default(), vec![Event::OpenRecipe(summary)]);
        let detail = state.detail.as_ref().map(DetailOverlay::gallery);
        let gallery = detail.unwrap_or_default();
        assert_eq!(gallery.len(), 5);
        assert_eq!(gallery[0], "https://img.example/3.jpg");
        assert!(gallery[4].ends_with("/ing3.png"));

        let selected = reduce(state.clone(), Event::SelectImage(2)).state;
        assert_eq!(
            selected.detail.map(|d| d.main_image),
            Some(gallery[2].clone())
        );

        let out_of_range = reduce(state.clone(), Event::SelectImage(9)).state;
        assert_eq!(out_of_range, state);
    }

    #[test]
    fn test_retry_detail_only_after_failure() {
        let opened = apply(SessionState::default(), vec![Event::OpenRecipe(recipe(4, 0))]);
        assert!(reduce(opened.clone(), Event::RetryDetail).effects.is_empty());

        let failed = reduce(
            opened,
            Event::DetailResolved {
                recipe_id: 4,
                result: QueryResult::failed(AppError::network("Spoonacular API", "reset"), None),
            },
        )
        .state;
        let retry = reduce(failed, Event::RetryDetail);
        assert_eq!(retry.effects, vec![Effect::RefetchDetail(4)]);
    }

    #[test]
    fn test_recipe_at_uses_visible_positions() {
        let state = apply(
            SessionState::default(),
            vec![
                Event::AddIngredient("x".into()),
                resolved(&["x"], vec![recipe(1, 9), recipe(2, 0)]),
            ],
        );
        assert_eq!(state.recipe_at(1).map(|r| r.id), Some(2));
        assert!(state.recipe_at(0).is_none());
        assert!(state.recipe_at(2).is_none());
    }

    #[test]
    fn test_detail_tab_parsing() {
        assert_eq!("Instructions".parse::<DetailTab>().ok(), Some(DetailTab::Instructions));
        assert_eq!("i".parse::<DetailTab>().ok(), Some(DetailTab::Ingredients));
        assert!("nutrition".parse::<DetailTab>().is_err());
    }
}
