// ABOUTME: `favorites` subcommands over the local favorites store
// ABOUTME: List, show, add, remove, clear with confirmation, export, and import
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors

use anyhow::{anyhow, Context, Result};
use clap::Subcommand;
use spicesync::{
    client::{ApiClient, UiContext},
    config::ClientConfig,
    favorites::{FavoritesStore, FileStorage},
    models::Recipe,
    nutrition::resolve_nutrition,
    render::FavoritesListView,
};
use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};

use crate::output::Output;

#[non_exhaustive]
#[derive(Subcommand)]
pub enum FavoritesCommand {
    /// List saved recipes, newest first
    List,

    /// Show one saved recipe
    Show {
        /// 1-based position in the list
        number: usize,

        /// Show nutrition for the whole recipe instead of per serving
        #[arg(long)]
        whole_recipe: bool,

        /// Ask the backend for a nutrition estimate when the recipe has none
        #[arg(long)]
        estimate: bool,
    },

    /// Save recipes from a JSON file (`-` for stdin): one recipe or an array
    Add {
        /// Source file
        file: PathBuf,
    },

    /// Remove one saved recipe
    Remove {
        /// 1-based position in the list
        number: usize,
    },

    /// Remove every saved recipe
    Clear {
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Write the favorites to a JSON file
    Export {
        /// Target file; defaults to `spicesync_favorites.json` in the current directory
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
}

/// Run one favorites subcommand
pub async fn run(command: FavoritesCommand, config: &ClientConfig, output: &Output) -> Result<()> {
    let store = FavoritesStore::open(&config.data_dir);

    match command {
        FavoritesCommand::List => {
            output.favorites(&FavoritesListView::from_recipes(&store.load()));
        }
        FavoritesCommand::Show {
            number,
            whole_recipe,
            estimate,
        } => {
            let mut recipe = nth_favorite(&store, number)?;
            if estimate {
                let api = ApiClient::from_config(config);
                if let Some(nutrition) = resolve_nutrition(&recipe, Some(&api)).await {
                    recipe = recipe.with_nutrition(nutrition);
                }
            }

            let mut context = UiContext::new();
            context.open_recipe(recipe);
            if whole_recipe {
                context.toggle_nutrition_mode();
            }
            if let (Some(detail), Some(nutrition)) =
                (context.detail_view(true), context.nutrition_view())
            {
                output.recipe_detail(&detail, &nutrition);
            }
        }
        FavoritesCommand::Add { file } => {
            let raw = read_source(&file)?;
            let recipes = parse_recipes(&raw)?;
            let mut added = 0;
            for recipe in &recipes {
                if store.add(recipe)? {
                    added += 1;
                }
            }
            output.message(&format!(
                "Added {added} of {} recipes ({} favorites)",
                recipes.len(),
                store.count()
            ));
        }
        FavoritesCommand::Remove { number } => {
            let recipe = nth_favorite(&store, number)?;
            store.remove(&recipe)?;
            output.message(&format!("Removed \"{}\"", recipe.title));
        }
        FavoritesCommand::Clear { yes } => {
            let cleared = if yes {
                store.clear(&|_: &str| true)?
            } else {
                store.clear(&prompt_confirmation)?
            };
            output.message(if cleared {
                "Favorites cleared."
            } else {
                "Nothing was removed."
            });
        }
        FavoritesCommand::Export { output: target } => {
            let path = match target {
                Some(path) => {
                    store.export_to_file(&path)?;
                    path
                }
                None => store.export_to_dir(Path::new("."))?,
            };
            output.message(&format!(
                "Exported {} favorites to {}",
                store.count(),
                path.display()
            ));
        }
    }
    Ok(())
}

fn nth_favorite(store: &FavoritesStore<FileStorage>, number: usize) -> Result<Recipe> {
    let favorites = store.load();
    number
        .checked_sub(1)
        .and_then(|index| favorites.get(index).cloned())
        .ok_or_else(|| anyhow!("No favorite #{number}; {} saved", favorites.len()))
}

fn read_source(file: &Path) -> Result<String> {
    if file == Path::new("-") {
        let mut raw = String::new();
        io::stdin()
            .read_to_string(&mut raw)
            .context("Failed to read stdin")?;
        return Ok(raw);
    }
    std::fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))
}

/// An exported array, or a single recipe object
fn parse_recipes(raw: &str) -> Result<Vec<Recipe>> {
    if let Ok(recipes) = FavoritesStore::<FileStorage>::parse_artifact(raw) {
        return Ok(recipes);
    }
    let recipe: Recipe =
        serde_json::from_str(raw).context("Input is neither a recipe nor a recipe array")?;
    Ok(vec![recipe])
}

fn prompt_confirmation(prompt: &str) -> bool {
    print!("{prompt} [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_recipes_accepts_object_and_array() {
        assert_eq!(parse_recipes(r#"{"title":"Soup"}"#).unwrap().len(), 1);
        assert_eq!(
            parse_recipes(r#"[{"title":"Soup"},{"title":"Stew"}]"#).unwrap().len(),
            2
        );
        assert!(parse_recipes("not json").is_err());
    }
}
