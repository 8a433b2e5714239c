//! Orchestrator-workers - task decomposition with one worker per subtask.
//!
//! One analysis call splits a task description into typed subtasks; each
//! subtask then gets one worker call rendered from (original task, kind,
//! description). Worker calls run sequentially and responses keep task order.

use std::sync::Arc;

use tracing::info;

use crate::config::DEFAULT_MODEL;
use crate::error::{FlowError, FlowResult};
use crate::models::{OrchestratorOutput, TaskPlan};
use crate::prompts::{self, render};
use crate::provider::{self, LLMProvider};
use crate::util::truncate;

pub struct TaskOrchestrator {
    provider: Arc<dyn LLMProvider>,
    model: String,
    analyzer_prompt: String,
    worker_prompt: String,
}

impl TaskOrchestrator {
    pub fn new(provider: Arc<dyn LLMProvider>) -> Self {
        Self {
            provider,
            model: DEFAULT_MODEL.to_string(),
            analyzer_prompt: prompts::TASK_ANALYZER.to_string(),
            worker_prompt: prompts::TASK_WORKER.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_prompts(
        mut self,
        analyzer_prompt: impl Into<String>,
        worker_prompt: impl Into<String>,
    ) -> Self {
        self.analyzer_prompt = analyzer_prompt.into();
        self.worker_prompt = worker_prompt.into();
        self
    }

    pub async fn process(&self, task_description: &str) -> FlowResult<OrchestratorOutput> {
        if task_description.trim().is_empty() {
            return Err(FlowError::Validation(
                "task description must not be empty".to_string(),
            ));
        }

        let analyzer = render(&self.analyzer_prompt, &[("task", task_description)]);
        let plan: TaskPlan =
            provider::complete_as(self.provider.as_ref(), &self.model, analyzer, None).await?;

        if plan.tasks.is_empty() {
            return Err(FlowError::Completion(
                "task analysis produced no subtasks".to_string(),
            ));
        }

        info!(
            subtasks = plan.tasks.len(),
            analysis = %truncate(&plan.analysis, 200),
            "task decomposition"
        );

        let mut worker_responses = Vec::with_capacity(plan.tasks.len());
        for task in &plan.tasks {
            let worker = render(
                &self.worker_prompt,
                &[
                    ("original_task", task_description),
                    ("task_kind", &task.kind),
                    ("task_description", &task.description),
                ],
            );
            let content = self
                .provider
                .generate(&self.model, worker, None)
                .await
                .map_err(FlowError::completion)?;
            info!(kind = %task.kind, output_len = content.len(), "worker response");
            worker_responses.push(content);
        }

        Ok(OrchestratorOutput {
            analysis: plan.analysis,
            worker_responses,
        })
    }
}
