//! Two-level supervisor/worker turn loop.
//!
//! For each turn, one supervisor decision picks a team, one team decision
//! picks a worker, and this loop applies the worker's output to the run
//! state. Unrecognized branch labels are logged no-ops: the run is
//! turn-bounded and self-correcting, so a drifting router must not crash it.
//! A completion failure anywhere in a turn is fatal to the run.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{FlowError, FlowResult};
use crate::hierarchy::agents::TeamAgents;
use crate::models::{TeamRunResult, TeamState};
use crate::provider::LLMProvider;
use crate::util::preview;

/// Branches reachable from a supervisor decision.
enum SupervisorBranch {
    ResearchTeam,
    DocumentAuthoring,
    Finish,
    Unrecognized(String),
}

impl From<&str> for SupervisorBranch {
    fn from(label: &str) -> Self {
        match label {
            "RESEARCH_TEAM" => SupervisorBranch::ResearchTeam,
            "DOCUMENT_AUTHORING" => SupervisorBranch::DocumentAuthoring,
            "FINISH" => SupervisorBranch::Finish,
            other => SupervisorBranch::Unrecognized(other.to_string()),
        }
    }
}

enum ResearchWorker {
    Searcher,
    WebScraper,
    Return,
    Unrecognized(String),
}

impl From<&str> for ResearchWorker {
    fn from(label: &str) -> Self {
        match label {
            "SEARCHER" => ResearchWorker::Searcher,
            "WEB_SCRAPER" => ResearchWorker::WebScraper,
            "RETURN" => ResearchWorker::Return,
            other => ResearchWorker::Unrecognized(other.to_string()),
        }
    }
}

enum DocumentWorker {
    Writer,
    NoteTaker,
    ChartGenerator,
    Return,
    Unrecognized(String),
}

impl From<&str> for DocumentWorker {
    fn from(label: &str) -> Self {
        match label {
            "WRITER" => DocumentWorker::Writer,
            "NOTE_TAKER" => DocumentWorker::NoteTaker,
            "CHART_GENERATOR" => DocumentWorker::ChartGenerator,
            "RETURN" => DocumentWorker::Return,
            other => DocumentWorker::Unrecognized(other.to_string()),
        }
    }
}

pub struct TeamOrchestrator {
    agents: TeamAgents,
}

impl TeamOrchestrator {
    pub fn new(provider: Arc<dyn LLMProvider>) -> Self {
        Self {
            agents: TeamAgents::new(provider),
        }
    }

    pub fn with_agents(agents: TeamAgents) -> Self {
        Self { agents }
    }

    /// Run the bounded turn loop until the supervisor decides `FINISH` or
    /// `max_turns` is exhausted.
    pub async fn orchestrate(&self, goal: &str, max_turns: usize) -> FlowResult<TeamRunResult> {
        if goal.trim().is_empty() {
            return Err(FlowError::Validation("goal must not be empty".to_string()));
        }
        if max_turns == 0 {
            return Err(FlowError::Validation(
                "max_turns must be greater than zero".to_string(),
            ));
        }

        let mut state = TeamState::new(goal);
        info!(%goal, max_turns, "team run start");

        for turn in 1..=max_turns {
            let decision = self.agents.supervisor(&state).await?;
            info!(turn, next = %decision.next, reason = %decision.reason, "supervisor decision");

            match SupervisorBranch::from(decision.next.as_str()) {
                SupervisorBranch::ResearchTeam => self.research_turn(&mut state).await?,
                SupervisorBranch::DocumentAuthoring => self.document_turn(&mut state).await?,
                SupervisorBranch::Finish => {
                    info!(
                        turn,
                        draft_len = state.draft.len(),
                        notes = state.notes.len(),
                        charts = state.charts.len(),
                        "finish"
                    );
                    return Ok(TeamRunResult::from_state(state, turn));
                }
                SupervisorBranch::Unrecognized(label) => {
                    warn!(turn, %label, "supervisor returned unknown branch");
                }
            }

            debug!(
                turn,
                draft_len = state.draft.len(),
                notes = state.notes.len(),
                charts = state.charts.len(),
                "turn complete"
            );
        }

        info!(max_turns, "max turns reached, returning current state");
        Ok(TeamRunResult::from_state(state, max_turns))
    }

    async fn research_turn(&self, state: &mut TeamState) -> FlowResult<()> {
        let decision = self.agents.research_router(state).await?;
        info!(next = %decision.next, reason = %decision.reason, "research router");

        match ResearchWorker::from(decision.next.as_str()) {
            ResearchWorker::Searcher => {
                let worker = self.agents.searcher(&state.goal).await?;
                state.notes.push(format!("Research:\n{}", worker.content));
                info!(notes = state.notes.len(), "searcher appended notes");
            }
            ResearchWorker::WebScraper => {
                let worker = self.agents.web_scraper(&state.goal).await?;
                state.notes.push(format!("Sources:\n{}", worker.content));
                info!(notes = state.notes.len(), "web scraper appended notes");
            }
            ResearchWorker::Return => debug!("research team returned control"),
            ResearchWorker::Unrecognized(label) => {
                warn!(%label, "research router returned unknown worker");
            }
        }
        Ok(())
    }

    async fn document_turn(&self, state: &mut TeamState) -> FlowResult<()> {
        let decision = self.agents.document_router(state).await?;
        info!(next = %decision.next, reason = %decision.reason, "document router");

        match DocumentWorker::from(decision.next.as_str()) {
            DocumentWorker::Writer => {
                let worker = self.agents.writer(&state.goal, &state.notes).await?;
                state.draft = worker.content;
                info!(draft_len = state.draft.len(), "writer updated draft");
            }
            DocumentWorker::NoteTaker => {
                let worker = self.agents.note_taker(&state.notes.join("\n")).await?;
                state
                    .notes
                    .push(format!("Condensed notes:\n{}", preview(&worker.content, 500)));
                info!(notes = state.notes.len(), "note taker refined notes");
            }
            DocumentWorker::ChartGenerator => {
                let worker = self.agents.chart_generator(&state.goal, &state.notes).await?;
                state.charts.push(worker.content);
                info!(charts = state.charts.len(), "chart generator proposed charts");
            }
            DocumentWorker::Return => debug!("document team returned control"),
            DocumentWorker::Unrecognized(label) => {
                warn!(%label, "document router returned unknown worker");
            }
        }
        Ok(())
    }
}
