// ABOUTME: End-to-end tests of the API client against an in-process server
// ABOUTME: Covers display outcomes for success, API errors, raw text, and network failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use helpers::stub_provider::{StubProvider, StubReply};
use spicesync::{
    client::{ApiClient, ClientError, GenerateControl, GenerationApi, GenerationOutcome, UiContext},
    generation::GenerateRequest,
    models::{Ingredient, Recipe},
    nutrition::resolve_nutrition,
    render::{NutritionMode, NutritionPanelView},
};

#[tokio::test]
async fn test_generate_fills_context_and_restores_control() {
    let (base_url, server) = common::spawn_server(StubProvider::content(common::TWO_RECIPES)).await;
    let api = ApiClient::new(&base_url);
    let control = GenerateControl::new();
    let mut context = UiContext::new();
    context.select_cuisine("Thai");

    let outcome = control
        .generate(&api, &mut context, "carrot, onion")
        .await;

    assert_eq!(outcome.recipes().len(), 2);
    assert_eq!(outcome.message(), None);
    assert_eq!(context.results.len(), 2);
    assert_eq!(control.label(), "Generate Recipes");

    let detail = context.open_result(0).unwrap();
    assert_eq!(detail.title, "Carrot Soup");
    assert!(matches!(
        context.nutrition_view(),
        Some(NutritionPanelView::Available(_))
    ));
    server.abort();
}

#[tokio::test]
async fn test_server_rejection_surfaces_message_and_payload() {
    let (base_url, server) = common::spawn_server(StubProvider::content("{}")).await;
    let api = ApiClient::new(&base_url);

    // Bypass the client-side blank check to reach the server-side one
    let request: GenerateRequest =
        serde_json::from_value(serde_json::json!({"ingredients": ""})).unwrap();
    let error = api.generate(&request).await.unwrap_err();
    let ClientError::Api { status, message, .. } = &error else {
        panic!("expected API error, got {error:?}");
    };
    assert_eq!(*status, 400);
    assert_eq!(message, "Missing ingredients");

    let outcome = GenerationOutcome::from_error(&error);
    assert_eq!(
        outcome.message().as_deref(),
        Some("Error: Missing ingredients")
    );
    let raw = outcome.raw_panel().unwrap();
    assert!(raw.contains("\"success\": false"));
    assert!(raw.contains("Missing ingredients"));
    server.abort();
}

#[tokio::test]
async fn test_upstream_failure_is_an_api_error_outcome() {
    let (base_url, server) = common::spawn_server(StubProvider::new(StubReply::NoCompletion)).await;
    let api = ApiClient::new(&base_url);
    let control = GenerateControl::new();
    let mut context = UiContext::new();

    let outcome = control.generate(&api, &mut context, "carrot").await;
    assert_eq!(
        outcome.message().as_deref(),
        Some("Error: No completion returned")
    );
    assert!(context.results.is_empty());
    assert!(!control.is_disabled());
    server.abort();
}

#[tokio::test]
async fn test_empty_and_unstructured_results() {
    let (base_url, server) = common::spawn_server(StubProvider::content(r#"{"recipes": []}"#)).await;
    let outcome = GenerateControl::new()
        .generate(&ApiClient::new(&base_url), &mut UiContext::new(), "gravel")
        .await;
    assert_eq!(outcome, GenerationOutcome::NoResults);
    assert_eq!(outcome.message().as_deref(), Some("No recipes generated."));
    server.abort();

    let (base_url, server) = common::spawn_server(StubProvider::content("just prose")).await;
    let outcome = GenerateControl::new()
        .generate(&ApiClient::new(&base_url), &mut UiContext::new(), "gravel")
        .await;
    assert_eq!(
        outcome,
        GenerationOutcome::Unstructured {
            raw_text: "just prose".to_owned()
        }
    );
    server.abort();
}

#[tokio::test]
async fn test_unreachable_server_is_a_network_error() {
    // Bind and drop to get a local port with nothing listening
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let api = ApiClient::new(format!("http://{address}"));
    let outcome = GenerateControl::new()
        .generate(&api, &mut UiContext::new(), "carrot")
        .await;

    assert!(matches!(outcome, GenerationOutcome::NetworkError { .. }));
    assert!(outcome.message().unwrap().starts_with("Network error: "));
    assert_eq!(outcome.raw_panel(), None);
}

#[tokio::test]
async fn test_missing_nutrition_is_estimated_by_backend() {
    let (base_url, server) = common::spawn_server(StubProvider::content(
        r#"{"calories": 800, "protein_g": 20, "carbs_g": 100, "fat_g": 30}"#,
    ))
    .await;
    let api = ApiClient::new(&base_url);
    let recipe = Recipe::new("Pasta")
        .with_servings(2)
        .with_ingredients(vec![Ingredient::measured("pasta", "200 g")]);

    let nutrition = resolve_nutrition(&recipe, Some(&api)).await.unwrap();
    assert!((nutrition.calories - 800.0).abs() < f64::EPSILON);

    let panel = NutritionPanelView::new(Some(nutrition), recipe.servings, NutritionMode::PerServing);
    let NutritionPanelView::Available(figures) = panel else {
        panic!("expected figures");
    };
    assert_eq!(figures.calories, "400 kcal");
    server.abort();
}
