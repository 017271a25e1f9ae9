// ABOUTME: Interactive recipe search session: state machine, driver, rendering, and commands
// ABOUTME: Wires ingredient input and detail selection to cached queries and local filtering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Receepee Contributors

//! Session layer
//!
//! - [`state`]: pure `(state, event) -> (state, effects)` transitions
//! - [`driver`]: runs effects through [`crate::queries::RecipeQueries`]
//! - [`render`]: text view of a state
//! - [`commands`]: terminal input parsing

/// Terminal command parsing
pub mod commands;
/// Effect-running session driver
pub mod driver;
/// Display helpers
pub mod helpers;
/// Ingredient set and suggestions
pub mod ingredients;
/// Text rendering
pub mod render;
/// State machine
pub mod state;

pub use commands::{parse_command, Command};
pub use driver::Session;
pub use ingredients::{normalize, quick_add, suggestions, IngredientSet};
pub use render::{render_detail, render_session};
pub use state::{
    reduce, DetailOverlay, DetailTab, Effect, Event, Phase, QuerySlot, SessionState, Transition,
};
