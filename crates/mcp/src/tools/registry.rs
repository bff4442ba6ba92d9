// Tool trait and registry

use crate::protocol::{CallToolResult, ToolSchema};
use anyhow::{bail, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// Tool executor trait
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool schema advertised through `tools/list`.
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with given arguments.
    ///
    /// Expected failures (bad arguments, upstream errors) should be
    /// reported via [`CallToolResult::error`] where possible; an `Err` is
    /// converted into an error-flagged content response by the dispatcher.
    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult>;
}

/// Registry of the tools this server advertises.
///
/// Built once at startup; tool names are unique for the process lifetime.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
    order: Vec<String>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register a tool. A name collision is a startup configuration error.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<()> {
        let name = tool.schema().name;
        if self.tools.contains_key(&name) {
            bail!("duplicate tool name: {name}");
        }

        self.order.push(name.clone());
        self.tools.insert(name, tool);
        Ok(())
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// List all tool schemas in registration order.
    pub fn list_schemas(&self) -> Vec<ToolSchema> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|t| t.schema())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// Helper functions for creating tool schemas

pub fn json_schema_object(properties: serde_json::Value, required: Vec<&str>) -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

pub fn json_schema_string(description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "string",
        "description": description
    })
}

pub fn json_schema_number(description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "number",
        "description": description
    })
}

pub fn json_schema_boolean(description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "boolean",
        "description": description
    })
}

pub fn json_schema_array(items: serde_json::Value, description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "array",
        "items": items,
        "description": description
    })
}

/// Annotations shared by every tool on this server: they all reach out to
/// the open web.
pub fn open_world_annotations(title: &str) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "openWorldHint": true
    })
}
