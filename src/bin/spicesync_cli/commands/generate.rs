// ABOUTME: `generate` subcommand sending ingredients to the backend
// ABOUTME: Lists the results and optionally opens, estimates, and saves one recipe
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors

use anyhow::{anyhow, bail, Result};
use clap::Args;
use spicesync::{
    client::{ApiClient, GenerateControl, GenerationOutcome, UiContext},
    config::ClientConfig,
    favorites::FavoritesStore,
    models::Recipe,
    nutrition::resolve_nutrition,
    render::{FavoriteToggle, RecipeSummaryView},
};
use tracing::info;

use crate::output::Output;

/// Arguments of `spicesync-cli generate`
#[derive(Args)]
pub struct GenerateArgs {
    /// Ingredients, as separate words or one comma-separated string
    #[arg(required = true)]
    ingredients: Vec<String>,

    /// Cuisine preference (`any` for no preference)
    #[arg(long, short = 'c')]
    cuisine: Option<String>,

    /// Output language code, e.g. `en`, `es`, `fr`
    #[arg(long, short = 'l')]
    language: Option<String>,

    /// Open the result with this 1-based number in the detail view
    #[arg(long)]
    show: Option<usize>,

    /// Toggle the shown recipe in favorites
    #[arg(long, requires = "show")]
    save: bool,

    /// Show nutrition for the whole recipe instead of per serving
    #[arg(long, requires = "show")]
    whole_recipe: bool,
}

/// Run one generation and print the outcome
pub async fn run(args: GenerateArgs, config: &ClientConfig, output: &Output) -> Result<()> {
    let api = ApiClient::from_config(config);
    let control = GenerateControl::new();
    let mut context = UiContext::new();
    if let Some(cuisine) = &args.cuisine {
        context.select_cuisine(cuisine);
    }
    if let Some(language) = &args.language {
        context.select_language(language);
    }

    let ingredients = args.ingredients.join(", ");
    eprintln!("{}", spicesync::constants::labels::GENERATE_BUSY);
    let outcome = control.generate(&api, &mut context, &ingredients).await;

    match &outcome {
        GenerationOutcome::ApiError { .. }
        | GenerationOutcome::NetworkError { .. }
        | GenerationOutcome::EmptyInput
        | GenerationOutcome::Busy => {
            if let Some(raw) = outcome.raw_panel() {
                output.raw(raw);
            }
            bail!(outcome.message().unwrap_or_default());
        }
        GenerationOutcome::Unstructured { raw_text } => {
            output.message("The model did not return structured recipes:");
            output.raw(raw_text);
            return Ok(());
        }
        GenerationOutcome::NoResults | GenerationOutcome::Recipes { .. } => {}
    }

    let views: Vec<RecipeSummaryView> = context
        .results
        .iter()
        .map(RecipeSummaryView::from_recipe)
        .collect();
    output.recipe_list(&views);

    let Some(number) = args.show else {
        return Ok(());
    };
    let recipe = open_numbered(&mut context, number)?;

    if recipe.nutrition.is_none() {
        if let Some(nutrition) = resolve_nutrition(&recipe, Some(&api)).await {
            context.open_recipe(recipe.clone().with_nutrition(nutrition));
        }
    }
    if args.whole_recipe {
        context.toggle_nutrition_mode();
    }
    let recipe = context.current_recipe.clone().unwrap_or(recipe);

    let store = FavoritesStore::open(&config.data_dir);
    let mut favorited = store.is_favorited(&recipe);
    if args.save {
        let mut toggle = FavoriteToggle::for_state(favorited);
        toggle.activate(&store, &recipe)?;
        favorited = toggle.favorited;
        info!(favorited, "Favorite toggled");
        output.message(if favorited {
            "Saved to favorites."
        } else {
            "Removed from favorites."
        });
    }

    if let (Some(detail), Some(nutrition)) =
        (context.detail_view(favorited), context.nutrition_view())
    {
        output.recipe_detail(&detail, &nutrition);
    }
    Ok(())
}

/// Open the 1-based result `number` in the detail view
fn open_numbered(context: &mut UiContext, number: usize) -> Result<Recipe> {
    let generated = context.results.len();
    number
        .checked_sub(1)
        .and_then(|index| context.open_result(index).cloned())
        .ok_or_else(|| anyhow!("No recipe #{number}; {generated} generated"))
}
