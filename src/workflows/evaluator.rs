//! Refine loop - generate, evaluate, feed feedback back into generation.
//!
//! The loop alternates a generator call producing `{thoughts, response}` and
//! an evaluator call producing `{verdict, feedback}`. A PASS verdict accepts
//! the candidate; anything else rebuilds the generation context from every
//! prior response and every piece of feedback, newest last, and tries again.
//! An optional attempt ceiling guarantees termination against an evaluator
//! that never passes.

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::DEFAULT_MODEL;
use crate::error::{FlowError, FlowResult};
use crate::models::{EvaluationResult, Generation, RefinedResult, Verdict};
use crate::prompts;
use crate::provider::{self, LLMProvider};
use crate::util::truncate;

pub struct RefineLoop {
    provider: Arc<dyn LLMProvider>,
    model: String,
    generator_prompt: String,
    evaluator_prompt: String,
    /// Attempt ceiling. `None` reproduces the unbounded reference behavior.
    max_attempts: Option<usize>,
}

impl RefineLoop {
    pub fn new(provider: Arc<dyn LLMProvider>) -> Self {
        Self {
            provider,
            model: DEFAULT_MODEL.to_string(),
            generator_prompt: prompts::GENERATOR.to_string(),
            evaluator_prompt: prompts::EVALUATOR.to_string(),
            max_attempts: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_prompts(
        mut self,
        generator_prompt: impl Into<String>,
        evaluator_prompt: impl Into<String>,
    ) -> Self {
        self.generator_prompt = generator_prompt.into();
        self.evaluator_prompt = evaluator_prompt.into();
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Refine until the evaluator passes a candidate or the attempt budget
    /// runs out. A completion failure in either phase aborts the loop with
    /// the partial chain of thought attached.
    pub async fn refine(&self, task: &str) -> FlowResult<RefinedResult> {
        if task.trim().is_empty() {
            return Err(FlowError::Validation("refine task must not be empty".to_string()));
        }

        let mut memory: Vec<String> = Vec::new();
        let mut feedback_log: Vec<String> = Vec::new();
        let mut history: Vec<Generation> = Vec::new();
        let mut context = String::new();
        let mut attempts = 0usize;

        loop {
            attempts += 1;

            let generation = match self.generate(task, &context).await {
                Ok(generation) => generation,
                Err(source) => {
                    return Err(FlowError::RefineAborted {
                        history,
                        source: Box::new(source),
                    })
                }
            };
            memory.push(generation.response.clone());
            history.push(generation.clone());

            let evaluation = match self.evaluate(task, &generation.response).await {
                Ok(evaluation) => evaluation,
                Err(source) => {
                    return Err(FlowError::RefineAborted {
                        history,
                        source: Box::new(source),
                    })
                }
            };

            info!(
                attempt = attempts,
                verdict = %evaluation.verdict,
                feedback = %truncate(&evaluation.feedback, 160),
                "evaluation"
            );

            if evaluation.verdict == Verdict::Pass {
                return Ok(RefinedResult {
                    solution: generation.response,
                    history,
                });
            }

            if let Some(max) = self.max_attempts {
                if attempts >= max {
                    return Err(FlowError::RetriesExhausted { attempts, history });
                }
            }

            feedback_log.push(evaluation.feedback);
            context = build_context(&memory, &feedback_log);
        }
    }

    async fn generate(&self, task: &str, context: &str) -> FlowResult<Generation> {
        let prompt = format!("{}\n{context}\nTask: {task}", self.generator_prompt);
        let generation: Generation =
            provider::complete_as(self.provider.as_ref(), &self.model, prompt, None).await?;
        debug!(thoughts = %truncate(&generation.thoughts, 160), "generator output");
        Ok(generation)
    }

    async fn evaluate(&self, task: &str, content: &str) -> FlowResult<EvaluationResult> {
        let prompt = format!(
            "{}\nOriginal task: {task}\nContent to evaluate: {content}",
            self.evaluator_prompt
        );
        provider::complete_as(self.provider.as_ref(), &self.model, prompt, None).await
    }
}

/// All prior responses, then all feedback, newest last.
fn build_context(memory: &[String], feedback_log: &[String]) -> String {
    let mut context = String::from("Previous attempts:");
    for entry in memory {
        context.push_str("\n- ");
        context.push_str(entry);
    }
    for feedback in feedback_log {
        context.push_str("\nFeedback: ");
        context.push_str(feedback);
    }
    context
}
