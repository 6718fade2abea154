// ABOUTME: Generate button state with a single in-flight request
// ABOUTME: A drop guard restores the idle label whatever the request outcome
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors

use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

use super::{GenerationApi, GenerationOutcome, UiContext};
use crate::constants::labels::{GENERATE_BUSY, GENERATE_IDLE};

/// The generate control
///
/// Pressing it while a request is in flight is rejected with
/// [`GenerationOutcome::Busy`] instead of starting a second request.
#[derive(Debug, Default)]
pub struct GenerateControl {
    in_flight: AtomicBool,
}

/// Marks the control busy until dropped
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    control: &'a GenerateControl,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.control.in_flight.store(false, Ordering::Release);
    }
}

impl GenerateControl {
    /// Idle control
    #[must_use]
    pub const fn new() -> Self {
        Self {
            in_flight: AtomicBool::new(false),
        }
    }

    /// Whether a request is in flight
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Current button label
    #[must_use]
    pub fn label(&self) -> &'static str {
        if self.is_disabled() {
            GENERATE_BUSY
        } else {
            GENERATE_IDLE
        }
    }

    /// Mark the control busy; `None` when it already is
    #[must_use]
    pub fn begin(&self) -> Option<InFlightGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard { control: self })
    }

    /// Run one generation for `ingredients` and update `context`
    ///
    /// Blank ingredients return [`GenerationOutcome::EmptyInput`] without a
    /// request and without touching the control or the context.
    pub async fn generate<A>(
        &self,
        api: &A,
        context: &mut UiContext,
        ingredients: &str,
    ) -> GenerationOutcome
    where
        A: GenerationApi + ?Sized,
    {
        let Some(request) = context.build_request(ingredients) else {
            debug!("Blank ingredients, nothing sent");
            return GenerationOutcome::EmptyInput;
        };
        let Some(_guard) = self.begin() else {
            debug!("Generation already in flight");
            return GenerationOutcome::Busy;
        };

        let outcome = match api.generate(&request).await {
            Ok(response) => GenerationOutcome::from_response(response),
            Err(error) => GenerationOutcome::from_error(&error),
        };
        info!(message = ?outcome.message(), recipes = outcome.recipes().len(), "Generation finished");

        context.apply(&outcome);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientError;
    use crate::generation::{GenerateRequest, GenerateResponse};
    use crate::models::Recipe;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;
    use tokio::sync::Notify;

    #[derive(Default)]
    struct StubApi {
        calls: AtomicUsize,
        release: Option<Arc<Notify>>,
        fail: bool,
    }

    #[async_trait]
    impl GenerationApi for StubApi {
        async fn generate(
            &self,
            _request: &GenerateRequest,
        ) -> Result<GenerateResponse, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(release) = &self.release {
                release.notified().await;
            }
            if self.fail {
                return Err(ClientError::Api {
                    status: 500,
                    message: "No completion returned".to_owned(),
                    raw: json!({"success": false}),
                });
            }
            Ok(GenerateResponse {
                success: true,
                recipes: vec![Recipe::new("Soup")],
                raw_text: None,
            })
        }
    }

    #[tokio::test]
    async fn test_empty_input_sends_nothing() {
        let api = StubApi::default();
        let control = GenerateControl::new();
        let mut context = UiContext::new();
        let before = context.clone();

        let outcome = control.generate(&api, &mut context, "  ").await;
        assert_eq!(outcome, GenerationOutcome::EmptyInput);
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
        assert_eq!(context, before);
        assert_eq!(control.label(), "Generate Recipes");
    }

    #[tokio::test]
    async fn test_label_restored_after_failure() {
        let api = StubApi {
            fail: true,
            ..StubApi::default()
        };
        let control = GenerateControl::new();
        let mut context = UiContext::new();

        let outcome = control.generate(&api, &mut context, "rice").await;
        assert_eq!(outcome.message().as_deref(), Some("Error: No completion returned"));
        assert!(!control.is_disabled());
        assert_eq!(control.label(), "Generate Recipes");
    }

    #[tokio::test]
    async fn test_reentry_is_rejected_while_in_flight() {
        let release = Arc::new(Notify::new());
        let api = StubApi {
            release: Some(release.clone()),
            ..StubApi::default()
        };
        let control = GenerateControl::new();
        let mut first_context = UiContext::new();
        let mut second_context = UiContext::new();

        let first = control.generate(&api, &mut first_context, "rice");
        let second = async {
            while !control.is_disabled() {
                tokio::task::yield_now().await;
            }
            assert_eq!(control.label(), "Generating...");
            let outcome = control.generate(&api, &mut second_context, "beans").await;
            release.notify_one();
            outcome
        };

        let (first_outcome, second_outcome) = tokio::join!(first, second);
        assert_eq!(second_outcome, GenerationOutcome::Busy);
        assert_eq!(first_outcome.recipes().len(), 1);
        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
        assert_eq!(control.label(), "Generate Recipes");
    }

    #[test]
    fn test_guard_releases_on_drop() {
        let control = GenerateControl::new();
        let guard = control.begin().unwrap();
        assert!(control.begin().is_none());
        drop(guard);
        assert!(control.begin().is_some());
    }
}
