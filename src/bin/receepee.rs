// ABOUTME: Receepee CLI - find recipes from the ingredients you have
// ABOUTME: One-shot search, detail, and random commands plus an interactive session loop
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Receepee Contributors
//!
//! Usage:
//! ```bash
//! # Interactive session (default)
//! receepee
//!
//! # One-shot search, locally filtered and sorted
//! receepee search -i chicken -i rice --max-missing 2 --sort fewest-missing
//!
//! # Recipe detail
//! receepee detail 716429 --tab instructions
//!
//! # Random recipes
//! receepee random --count 5
//! ```

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use receepee::config::AppConfig;
use receepee::logging::LoggingConfig;
use receepee::models::{RecipeId, RecipeSummary, SortMode};
use receepee::queries::RecipeQueries;
use receepee::session::{
    parse_command, render_detail, render_session, suggestions, Command as SessionCommand,
    DetailOverlay, DetailTab, Event, Session,
};
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tracing::{debug, info};

#[derive(Parser)]
#[command(
    name = "receepee",
    about = "Find recipes from the ingredients you have",
    long_about = "Searches the Spoonacular recipe API by pantry ingredients, filters and sorts the matches locally, and shows recipe details."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Search recipes by ingredients
    Search {
        /// Ingredient to search with (repeatable)
        #[arg(long = "ingredient", short = 'i', required = true)]
        ingredients: Vec<String>,

        /// Show recipes missing at most this many ingredients
        #[arg(long, default_value_t = receepee::constants::search::DEFAULT_MAX_MISSING)]
        max_missing: u32,

        /// Sort order: relevance, fewest-missing, most-popular
        #[arg(long, default_value = "relevance")]
        sort: SortMode,
    },
    /// Show one recipe in detail
    Detail {
        /// Recipe id
        id: RecipeId,

        /// Tab to show: ingredients or instructions
        #[arg(long, default_value = "ingredients")]
        tab: DetailTab,
    },
    /// Show random recipes
    Random {
        /// Number of recipes
        #[arg(long, default_value_t = receepee::constants::api::DEFAULT_RANDOM_NUMBER)]
        count: u32,
    },
    /// Interactive session reading commands from stdin
    Interactive,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging = logging.with_level("debug");
    }
    logging.init()?;

    let config = AppConfig::from_env();
    let queries = RecipeQueries::from_config(&config)?;

    match cli.command.unwrap_or(Command::Interactive) {
        Command::Search {
            ingredients,
            max_missing,
            sort,
        } => search(queries, ingredients, max_missing, sort).await,
        Command::Detail { id, tab } => detail(queries, id, tab).await,
        Command::Random { count } => random(&queries, count).await,
        Command::Interactive => interactive(queries).await,
    }
}

async fn search(
    queries: RecipeQueries,
    ingredients: Vec<String>,
    max_missing: u32,
    sort: SortMode,
) -> Result<()> {
    let mut session = Session::new(queries);
    session.dispatch(Event::SetMaxMissing(max_missing)).await;
    session.dispatch(Event::SetSort(sort)).await;
    session.dispatch(Event::AddIngredients(ingredients)).await;
    println!("{}", render_session(session.state()));

    session
        .state()
        .search
        .error
        .as_ref()
        .map_or(Ok(()), |error| Err(anyhow!(error.clone())))
}

async fn detail(queries: RecipeQueries, id: RecipeId, tab: DetailTab) -> Result<()> {
    let mut session = Session::new(queries);
    session
        .dispatch(Event::OpenRecipe(RecipeSummary {
            id,
            ..RecipeSummary::default()
        }))
        .await;

    // Fill the header from the fetched detail since no search summary exists
    let mut overlay: DetailOverlay = session
        .state()
        .detail
        .clone()
        .ok_or_else(|| anyhow!("Recipe {id} could not be opened"))?;
    if let Some(error) = &overlay.query.error {
        return Err(anyhow!(error.clone()));
    }
    if let Some(details) = &overlay.query.data {
        overlay.recipe.title.clone_from(&details.title);
        overlay.main_image = details.image.clone().unwrap_or_default();
        overlay.recipe.image.clone_from(&overlay.main_image);
    }
    overlay.tab = tab;
    println!("{}", render_detail(&overlay));
    Ok(())
}

async fn random(queries: &RecipeQueries, count: u32) -> Result<()> {
    let result = queries.random_recipes(count).await;
    if let Some(error) = result.error {
        return Err(anyhow!(error));
    }
    for (index, recipe) in result.data.unwrap_or_default().iter().enumerate() {
        println!(
            "{:>3}. {} (id {}) - {} mins, {} servings",
            index + 1,
            recipe.title,
            recipe.id,
            recipe.ready_in_minutes,
            recipe.servings
        );
    }
    Ok(())
}

async fn interactive(queries: RecipeQueries) -> Result<()> {
    info!("Starting interactive session");
    let mut session = Session::new(queries);
    println!("{}", render_session(session.state()));
    println!("Type 'help' for commands.");

    let mut lines = BufReader::new(io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(error) => {
                println!("{}", error.message);
                continue;
            }
        };

        match command {
            SessionCommand::Quit => break,
            SessionCommand::Help => {
                println!("{}", receepee::session::commands::HELP);
                continue;
            }
            SessionCommand::Suggest(ref text) => {
                let matches = suggestions(text, &session.state().ingredients);
                debug!(input = %text, count = matches.len(), "Ingredient suggestions");
                if matches.is_empty() {
                    println!("No suggestions for '{text}'");
                } else {
                    println!("Suggestions: {}", matches.join(", "));
                }
                continue;
            }
            _ => {}
        }

        match command.into_events(session.state()) {
            Ok(events) => {
                for event in events {
                    session.dispatch(event).await;
                }
                println!("{}", render_session(session.state()));
            }
            Err(error) => println!("{}", error.message),
        }
    }
    Ok(())
}
