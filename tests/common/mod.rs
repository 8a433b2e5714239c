//! Deterministic providers for exercising the workflow patterns without a
//! live model.
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use agentic_flows::provider::LLMProvider;
use async_trait::async_trait;

/// Replays a scripted list of responses in order and records every prompt.
pub struct ScriptedProvider {
    script: Mutex<VecDeque<Result<String, String>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new(responses: &[&str]) -> Self {
        Self::with_script(responses.iter().map(|r| Ok(r.to_string())).collect())
    }

    pub fn with_script(script: Vec<Result<String, String>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl LLMProvider for ScriptedProvider {
    async fn generate(
        &self,
        _model: &str,
        prompt: String,
        _system: Option<String>,
    ) -> anyhow::Result<String> {
        self.calls.lock().unwrap().push(prompt);
        match self.script.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(cause)) => Err(anyhow::anyhow!(cause)),
            None => Err(anyhow::anyhow!("script exhausted")),
        }
    }
}

/// Echoes `f(<input>)` for prompts of the form `...\nInput: <input>`, with
/// optional per-input delays to vary completion order and an optional input
/// marker that triggers a failure.
pub struct EchoProvider {
    delays_ms: HashMap<String, u64>,
    fail_on: Option<String>,
    calls: Mutex<Vec<String>>,
}

impl EchoProvider {
    pub fn new() -> Self {
        Self {
            delays_ms: HashMap::new(),
            fail_on: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delays(mut self, delays_ms: &[(&str, u64)]) -> Self {
        self.delays_ms = delays_ms
            .iter()
            .map(|(input, ms)| (input.to_string(), *ms))
            .collect();
        self
    }

    pub fn fail_on(mut self, input: &str) -> Self {
        self.fail_on = Some(input.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl LLMProvider for EchoProvider {
    async fn generate(
        &self,
        _model: &str,
        prompt: String,
        _system: Option<String>,
    ) -> anyhow::Result<String> {
        self.calls.lock().unwrap().push(prompt.clone());
        let input = prompt
            .rsplit("Input: ")
            .next()
            .unwrap_or_default()
            .to_string();
        if let Some(ms) = self.delays_ms.get(&input) {
            tokio::time::sleep(Duration::from_millis(*ms)).await;
        }
        if self.fail_on.as_deref() == Some(input.as_str()) {
            anyhow::bail!("simulated failure for input '{input}'");
        }
        Ok(format!("f({input})"))
    }
}
