//! Chain - sequential prompt pipeline.
//!
//! Each stage renders its prompt together with the previous stage's output
//! and issues one completion call. Stage i+1 only starts after stage i has
//! returned; this dependency is the point of the pattern, so there is no
//! parallel variant.

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::DEFAULT_MODEL;
use crate::error::{FlowError, FlowResult};
use crate::prompts;
use crate::provider::LLMProvider;
use crate::util::truncate;

pub struct Chain {
    provider: Arc<dyn LLMProvider>,
    model: String,
    stage_prompts: Vec<String>,
}

impl Chain {
    /// Chain with the default report-normalization stages.
    pub fn new(provider: Arc<dyn LLMProvider>) -> Self {
        Self {
            provider,
            model: DEFAULT_MODEL.to_string(),
            stage_prompts: prompts::CHAIN_DEFAULT_STAGES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_stages(mut self, stage_prompts: Vec<String>) -> Self {
        self.stage_prompts = stage_prompts;
        self
    }

    /// Run the pipeline. A stage failure propagates immediately, identifying
    /// the failed stage index.
    pub async fn chain(&self, input: &str) -> FlowResult<String> {
        if self.stage_prompts.is_empty() {
            return Err(FlowError::Validation(
                "chain requires at least one stage prompt".to_string(),
            ));
        }

        let mut response = input.to_string();
        for (index, prompt) in self.stage_prompts.iter().enumerate() {
            debug!(stage = index, input = %truncate(&response, 200), "chain stage start");

            let staged = format!("{prompt}\n{response}");
            response = self
                .provider
                .generate(&self.model, staged, None)
                .await
                .map_err(|e| FlowError::ChainStage {
                    index,
                    source: Box::new(FlowError::completion(e)),
                })?;

            info!(stage = index, output = %truncate(&response, 200), "chain stage complete");
        }

        Ok(response)
    }
}
