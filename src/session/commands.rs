// ABOUTME: Parser for interactive terminal commands driving a session
// ABOUTME: Maps input lines to commands and resolves them into session events
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Receepee Contributors

use super::state::{DetailTab, Event, SessionState};
use crate::errors::{AppError, AppResult};
use crate::models::SortMode;

/// Help text listing every command
pub const HELP: &str = "\
Commands:
  add <ingredient>[, <ingredient>...]  add ingredients (bare text works too)
  suggest <text>                       list known ingredients containing text
  remove <ingredient>                  remove one ingredient
  clear                                remove every ingredient
  max <n>                              show recipes missing at most n ingredients
  sort <relevance|fewest-missing|most-popular>
  open <n>                             open the n-th recipe shown
  close                                close the recipe detail
  tab <ingredients|instructions>       switch the detail tab
  image <n>                            show the n-th gallery image
  retry                                retry the failed request
  help                                 show this help
  quit                                 leave";

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add one or more ingredients
    Add(Vec<String>),
    /// List vocabulary suggestions for partial input
    Suggest(String),
    /// Remove an ingredient
    Remove(String),
    /// Remove every ingredient
    Clear,
    /// Set the max-missing threshold
    MaxMissing(u32),
    /// Set the sort order
    Sort(SortMode),
    /// Open the recipe at a 1-based position of the visible list
    Open(usize),
    /// Close the detail overlay
    Close,
    /// Switch the detail tab
    Tab(DetailTab),
    /// Show the gallery image at a 1-based position
    Image(usize),
    /// Retry whichever request failed
    Retry,
    /// Print help
    Help,
    /// Leave the session
    Quit,
}

/// Parse one line of input
///
/// Returns `Ok(None)` for a blank line. Text that is not a known command is
/// treated as ingredients to add.
///
/// # Errors
///
/// Returns `InvalidInput` when a command's argument is missing or malformed
pub fn parse_command(line: &str) -> AppResult<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(word, rest)| (word, rest.trim()));

    let command = match word.to_lowercase().as_str() {
        "add" | "a" => Command::Add(split_ingredients(require(rest, "add")?)),
        "suggest" | "s" => Command::Suggest(require(rest, "suggest")?.to_owned()),
        "remove" | "rm" | "del" => Command::Remove(require(rest, "remove")?.to_owned()),
        "clear" => Command::Clear,
        "max" => Command::MaxMissing(parse_number(require(rest, "max")?, "max")?),
        "sort" => Command::Sort(require(rest, "sort")?.parse()?),
        "open" | "o" => Command::Open(parse_position(require(rest, "open")?, "open")?),
        "close" | "back" => Command::Close,
        "tab" => Command::Tab(require(rest, "tab")?.parse()?),
        "image" | "img" => Command::Image(parse_position(require(rest, "image")?, "image")?),
        "retry" | "r" => Command::Retry,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => Command::Add(split_ingredients(line)),
    };
    Ok(Some(command))
}

impl Command {
    /// Session events this command produces against the current state
    ///
    /// `Suggest`, `Help`, and `Quit` are handled by the caller and produce no events.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when a position does not refer to a visible
    /// recipe, or `ResourceNotFound` when no recipe detail is open
    pub fn into_events(self, state: &SessionState) -> AppResult<Vec<Event>> {
        let events = match self {
            Self::Add(ingredients) => vec![Event::AddIngredients(ingredients)],
            Self::Remove(ingredient) => vec![Event::RemoveIngredient(ingredient)],
            Self::Clear => vec![Event::ClearIngredients],
            Self::MaxMissing(max) => vec![Event::SetMaxMissing(max)],
            Self::Sort(sort) => vec![Event::SetSort(sort)],
            Self::Open(position) => {
                let recipe = state.recipe_at(position).ok_or_else(|| {
                    AppError::invalid_input(format!("No recipe at position {position}"))
                })?;
                vec![Event::OpenRecipe(recipe)]
            }
            Self::Close => vec![Event::CloseDetail],
            Self::Tab(tab) => {
                require_detail(state)?;
                vec![Event::SelectTab(tab)]
            }
            Self::Image(position) => {
                require_detail(state)?;
                let index = position.checked_sub(1).ok_or_else(|| {
                    AppError::invalid_input("Image positions start at 1")
                })?;
                vec![Event::SelectImage(index)]
            }
            Self::Retry => {
                let detail_failed = state
                    .detail
                    .as_ref()
                    .is_some_and(|detail| detail.query.error.is_some());
                if detail_failed {
                    vec![Event::RetryDetail]
                } else {
                    vec![Event::Retry]
                }
            }
            Self::Suggest(_) | Self::Help | Self::Quit => Vec::new(),
        };
        Ok(events)
    }
}

fn require<'a>(rest: &'a str, command: &str) -> AppResult<&'a str> {
    if rest.is_empty() {
        Err(AppError::invalid_input(format!(
            "'{command}' needs an argument, type 'help' for usage"
        )))
    } else {
        Ok(rest)
    }
}

fn require_detail(state: &SessionState) -> AppResult<()> {
    if state.detail.is_some() {
        Ok(())
    } else {
        Err(AppError::not_found("Open recipe"))
    }
}

fn split_ingredients(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

fn parse_number(text: &str, command: &str) -> AppResult<u32> {
    text.parse().map_err(|_| {
        AppError::invalid_input(format!(
            "'{command}' expects a non-negative number, got '{text}'"
        ))
    })
}

fn parse_position(text: &str, command: &str) -> AppResult<usize> {
    match text.parse::<usize>() {
        Ok(position) if position > 0 => Ok(position),
        _ => Err(AppError::invalid_input(format!(
            "'{command}' expects a position starting at 1, got '{text}'"
        ))),
    }
}
