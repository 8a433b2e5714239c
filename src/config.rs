//! Provider settings loaded from the environment.

use std::env;

pub const DEFAULT_MODEL: &str = "llama3.2:3b";

/// Connection settings for the completion service backing a run.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    /// Base URL for an OpenAI-compatible endpoint, or the Ollama host.
    pub base_url: String,
    /// Model passed to every completion call.
    pub model: String,
    pub api_key: Option<String>,
}

impl ProviderSettings {
    /// Read settings from `FLOWS_BASE_URL`, `FLOWS_MODEL` and `FLOWS_API_KEY`,
    /// consulting a local `.env` file first.
    pub fn from_env() -> Self {
        let _ = dotenv::dotenv();
        Self {
            base_url: env::var("FLOWS_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:11434".to_string()),
            model: env::var("FLOWS_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            api_key: env::var("FLOWS_API_KEY").ok(),
        }
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
        }
    }
}
