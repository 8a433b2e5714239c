//! Tool boundary.
//!
//! Tools are opaque capabilities invoked by name with primitive arguments.
//! Workers may consult the registry, but its contents are supplied by the
//! embedding application.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::{FlowError, FlowResult};

#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name the tool is invoked by.
    fn name(&self) -> String;

    /// What the tool does, for prompt rendering.
    fn description(&self) -> String;

    /// Invoke the tool with JSON-encoded arguments.
    async fn invoke(&self, args: Value) -> anyhow::Result<String>;
}

/// Registry of available tools, keyed by name.
#[derive(Default)]
pub struct ToolRegistry {
    tools: RwLock<HashMap<String, Arc<dyn Tool>>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register<T: Tool + 'static>(&self, tool: T) {
        let mut tools = self.tools.write().await;
        tools.insert(tool.name(), Arc::new(tool));
    }

    pub async fn contains(&self, name: &str) -> bool {
        self.tools.read().await.contains_key(name)
    }

    pub async fn tool_names(&self) -> Vec<String> {
        let tools = self.tools.read().await;
        let mut names: Vec<String> = tools.keys().cloned().collect();
        names.sort();
        names
    }

    pub async fn invoke(&self, name: &str, args: Value) -> FlowResult<String> {
        let tool = {
            let tools = self.tools.read().await;
            tools.get(name).cloned()
        };
        let tool = tool.ok_or_else(|| FlowError::Tool {
            name: name.to_string(),
            cause: "not registered".to_string(),
        })?;

        tool.invoke(args).await.map_err(|e| FlowError::Tool {
            name: name.to_string(),
            cause: e.to_string(),
        })
    }
}
