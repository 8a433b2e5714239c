//! Router - content classification followed by one specialized call.
//!
//! Exactly two completion calls per invocation, always sequential: one to
//! classify the input into a known route name, one with the prompt mapped to
//! that route. An unknown route name is surfaced as an error rather than
//! silently defaulted; the classification boundary is where prompt drift
//! shows up first.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::info;

use crate::config::DEFAULT_MODEL;
use crate::error::{FlowError, FlowResult};
use crate::extract;
use crate::models::Decision;
use crate::prompts::{self, render};
use crate::provider::LLMProvider;

pub struct Router {
    provider: Arc<dyn LLMProvider>,
    model: String,
}

impl Router {
    pub fn new(provider: Arc<dyn LLMProvider>) -> Self {
        Self {
            provider,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Classify `input` into one of `routes`, then answer with the prompt
    /// registered for the selected route.
    pub async fn route(&self, input: &str, routes: &BTreeMap<String, String>) -> FlowResult<String> {
        if input.trim().is_empty() {
            return Err(FlowError::Validation("routing input must not be empty".to_string()));
        }
        if routes.is_empty() {
            return Err(FlowError::Validation("routes map must not be empty".to_string()));
        }

        let decision = self.determine_route(input, routes).await?;

        let Some(selected_prompt) = routes.get(&decision.next) else {
            return Err(FlowError::UnknownRoute {
                route: decision.next,
                known: routes.keys().cloned().collect(),
                input: input.to_string(),
            });
        };

        info!(route = %decision.next, reason = %decision.reason, "route selected");

        self.provider
            .generate(&self.model, format!("{selected_prompt}\nInput: {input}"), None)
            .await
            .map_err(FlowError::completion)
    }

    async fn determine_route(
        &self,
        input: &str,
        routes: &BTreeMap<String, String>,
    ) -> FlowResult<Decision> {
        let options = routes.keys().cloned().collect::<Vec<_>>().join(", ");
        let selector = render(prompts::ROUTE_SELECTOR, &[("options", &options), ("input", input)]);

        let raw = self
            .provider
            .generate(&self.model, selector, None)
            .await
            .map_err(FlowError::completion)?;

        extract::parse_decision(&raw)
    }
}
