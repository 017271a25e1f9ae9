// ABOUTME: Session driver running state transitions and their effects against cached queries
// ABOUTME: Feeds query outcomes back into the transition function until no effect remains
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Receepee Contributors

use super::state::{reduce, Effect, Event, SessionState, Transition};
use crate::queries::RecipeQueries;
use std::collections::VecDeque;
use std::mem;
use tracing::debug;

/// One interactive session: state plus the queries its effects run through
pub struct Session {
    state: SessionState,
    queries: RecipeQueries,
}

impl Session {
    /// Start an empty session
    #[must_use]
    pub fn new(queries: RecipeQueries) -> Self {
        Self {
            state: SessionState::default(),
            queries,
        }
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// Queries backing this session
    #[must_use]
    pub const fn queries(&self) -> &RecipeQueries {
        &self.queries
    }

    /// Apply `event`, then run every resulting effect to completion
    ///
    /// Effects run one at a time in the order they were produced; each
    /// outcome is applied before the next effect starts.
    pub async fn dispatch(&mut self, event: Event) {
        let mut pending = VecDeque::from([event]);
        while let Some(event) = pending.pop_front() {
            let Transition { state, effects } = reduce(mem::take(&mut self.state), event);
            self.state = state;
            for effect in effects {
                pending.push_back(self.run(effect).await);
            }
        }
    }

    async fn run(&self, effect: Effect) -> Event {
        debug!(?effect, "Running session effect");
        match effect {
            Effect::FetchSearch(params) => Event::SearchResolved {
                result: self.queries.search_recipes(&params).await,
                ingredients: params.ingredients,
            },
            Effect::RefetchSearch(params) => Event::SearchResolved {
                result: self.queries.refetch_search(&params).await,
                ingredients: params.ingredients,
            },
            Effect::FetchDetail(recipe_id) => Event::DetailResolved {
                recipe_id,
                result: self.queries.recipe_details(Some(recipe_id)).await,
            },
            Effect::RefetchDetail(recipe_id) => Event::DetailResolved {
                recipe_id,
                result: self.queries.refetch_details(recipe_id).await,
            },
        }
    }
}
