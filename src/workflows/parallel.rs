//! Fan-out/fan-in - one prompt over N inputs, concurrently.
//!
//! Concurrency is capped by a semaphore of `n_workers` permits; permits are
//! held only for the duration of one call and released on every exit path.
//! Results come back in input order regardless of completion order. A single
//! failure fails the whole operation, but only after every dispatched call
//! has finished; siblings are never cancelled.

use std::sync::Arc;

use futures_util::future::join_all;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::config::DEFAULT_MODEL;
use crate::error::{FlowError, FlowResult};
use crate::provider::LLMProvider;

pub struct FanOut {
    provider: Arc<dyn LLMProvider>,
    model: String,
}

impl FanOut {
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

    /// Apply `prompt` to every input with at most `n_workers` concurrent
    /// calls, collecting results in input order.
    pub async fn fan_out(
        &self,
        prompt: &str,
        inputs: &[String],
        n_workers: usize,
    ) -> FlowResult<Vec<String>> {
        if prompt.trim().is_empty() {
            return Err(FlowError::Validation("fan-out prompt must not be empty".to_string()));
        }
        if inputs.is_empty() {
            return Err(FlowError::Validation("fan-out inputs must not be empty".to_string()));
        }
        if n_workers == 0 {
            return Err(FlowError::Validation(
                "fan-out worker count must be greater than zero".to_string(),
            ));
        }

        let semaphore = Arc::new(Semaphore::new(n_workers));
        let mut tasks = Vec::with_capacity(inputs.len());

        for (index, input) in inputs.iter().enumerate() {
            let provider = self.provider.clone();
            let model = self.model.clone();
            let semaphore = semaphore.clone();
            let rendered = format!("{prompt}\nInput: {input}");

            tasks.push(tokio::spawn(async move {
                let _permit = semaphore.acquire().await.ok();
                debug!(index, "fan-out worker start");
                provider.generate(&model, rendered, None).await
            }));
        }

        // join_all yields results in dispatch order, which is input order.
        let joined = join_all(tasks).await;

        let mut results = Vec::with_capacity(joined.len());
        let mut first_failure: Option<FlowError> = None;

        for (index, task) in joined.into_iter().enumerate() {
            let outcome = match task {
                Ok(call) => call.map_err(FlowError::completion),
                Err(join_err) => Err(FlowError::completion(join_err)),
            };
            match outcome {
                Ok(content) => results.push(content),
                Err(source) => {
                    warn!(index, error = %source, "fan-out worker failed");
                    if first_failure.is_none() {
                        first_failure = Some(FlowError::FanOutWorker {
                            index,
                            source: Box::new(source),
                        });
                    }
                }
            }
        }

        match first_failure {
            Some(err) => Err(err),
            None => Ok(results),
        }
    }
}
