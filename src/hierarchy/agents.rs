//! Supervisor, team-router and worker calls.
//!
//! Every call here is a pure function of (goal, current state) returning a
//! decision or a [`WorkerOutput`]; no worker touches the run state. The
//! searcher prefers a registered `web_search` tool when one is available and
//! falls back to the model's own knowledge otherwise.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, warn};

use crate::config::DEFAULT_MODEL;
use crate::error::{FlowError, FlowResult};
use crate::extract;
use crate::models::{Decision, TeamState, WorkerOutput};
use crate::prompts::{self, render};
use crate::provider::LLMProvider;
use crate::tools::ToolRegistry;

pub struct TeamAgents {
    provider: Arc<dyn LLMProvider>,
    model: String,
    tools: Option<Arc<ToolRegistry>>,
}

impl TeamAgents {
    pub fn new(provider: Arc<dyn LLMProvider>) -> Self {
        Self {
            provider,
            model: DEFAULT_MODEL.to_string(),
            tools: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_tools(mut self, tools: Arc<ToolRegistry>) -> Self {
        self.tools = Some(tools);
        self
    }

    pub async fn supervisor(&self, state: &TeamState) -> FlowResult<Decision> {
        let prompt = render(
            prompts::SUPERVISOR,
            &[
                ("goal", &state.goal),
                ("notes", &state.notes.join(" | ")),
                ("draft", &state.draft),
                ("cites", &state.citations.join(" | ")),
                ("charts", &state.charts.join(" | ")),
            ],
        );
        self.decide(prompt).await
    }

    pub async fn research_router(&self, state: &TeamState) -> FlowResult<Decision> {
        let prompt = render(
            prompts::RESEARCH_ROUTER,
            &[("goal", &state.goal), ("notes", &state.notes.join(" | "))],
        );
        self.decide(prompt).await
    }

    pub async fn document_router(&self, state: &TeamState) -> FlowResult<Decision> {
        let prompt = render(
            prompts::DOCUMENT_ROUTER,
            &[
                ("goal", &state.goal),
                ("draft", &state.draft),
                ("notes", &state.notes.join(" | ")),
                ("cites", &state.citations.join(" | ")),
            ],
        );
        self.decide(prompt).await
    }

    pub async fn searcher(&self, goal: &str) -> FlowResult<WorkerOutput> {
        if let Some(registry) = &self.tools {
            if registry.contains("web_search").await {
                match registry.invoke("web_search", json!({ "query": goal })).await {
                    Ok(found) => return Ok(WorkerOutput::new("SEARCHER", found)),
                    Err(e) => warn!(error = %e, "search tool failed, falling back to model"),
                }
            }
        }
        let content = self
            .complete(render(prompts::SEARCHER, &[("goal", goal)]))
            .await?;
        Ok(WorkerOutput::new("SEARCHER", content))
    }

    pub async fn web_scraper(&self, goal: &str) -> FlowResult<WorkerOutput> {
        let content = self
            .complete(render(prompts::WEB_SCRAPER, &[("goal", goal)]))
            .await?;
        Ok(WorkerOutput::new("WEB_SCRAPER", content))
    }

    pub async fn note_taker(&self, content: &str) -> FlowResult<WorkerOutput> {
        let condensed = self
            .complete(render(prompts::NOTE_TAKER, &[("content", content)]))
            .await?;
        Ok(WorkerOutput::new("NOTE_TAKER", condensed))
    }

    pub async fn writer(&self, goal: &str, notes: &[String]) -> FlowResult<WorkerOutput> {
        let content = self
            .complete(render(
                prompts::WRITER,
                &[("goal", goal), ("notes", &notes.join("\n"))],
            ))
            .await?;
        Ok(WorkerOutput::new("WRITER", content))
    }

    pub async fn chart_generator(&self, goal: &str, notes: &[String]) -> FlowResult<WorkerOutput> {
        let content = self
            .complete(render(
                prompts::CHART_GENERATOR,
                &[("goal", goal), ("notes", &notes.join("\n"))],
            ))
            .await?;
        Ok(WorkerOutput::new("CHART_GENERATOR", content))
    }

    async fn decide(&self, prompt: String) -> FlowResult<Decision> {
        let raw = self.complete(prompt).await?;
        let decision = extract::parse_decision(&raw)?;
        debug!(next = %decision.next, "decision");
        Ok(decision)
    }

    async fn complete(&self, prompt: String) -> FlowResult<String> {
        self.provider
            .generate(&self.model, prompt, None)
            .await
            .map_err(FlowError::completion)
    }
}
