// Summarizer tool, polling until the summary is ready

use crate::protocol::{CallToolResult, ToolContent, ToolSchema};
use crate::tools::{
    args_object, json_schema_boolean, json_schema_object, json_schema_string,
    open_world_annotations, Tool,
};
use anyhow::Result;
use brave_api::types::SummarizerResponse;
use brave_api::SearchApi;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

pub const NAME: &str = "brave_summarizer";

const DESCRIPTION: &str = "Retrieves an AI-generated summary for a prior web search. \
    Requires a summarizer key obtained from brave_web_search with the summary \
    parameter enabled. Returns the assembled summary text, optionally with inline \
    source references.";

const UNAVAILABLE: &str = "Unable to retrieve a Summarizer summary.";

/// Summaries are generated asynchronously upstream, so the endpoint is
/// polled until it reports completion or the attempt budget runs out.
#[derive(Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 20,
            delay: Duration::from_millis(50),
        }
    }
}

pub struct SummarizerTool {
    api: Arc<dyn SearchApi>,
    retry: RetryPolicy,
}

impl SummarizerTool {
    pub fn new(api: Arc<dyn SearchApi>) -> Self {
        Self::with_retry(api, RetryPolicy::default())
    }

    pub fn with_retry(api: Arc<dyn SearchApi>, retry: RetryPolicy) -> Self {
        Self { api, retry }
    }

    async fn poll(&self, params: serde_json::Map<String, Value>) -> Option<SummarizerResponse> {
        let mut attempts = self.retry.max_attempts;

        while attempts > 0 {
            attempts -= 1;
            match self.api.summarize(params.clone()).await {
                Ok(response) if response.status == "complete" => return Some(response),
                // Any other status means the summary is still being generated
                Ok(_) => {}
                Err(error) => {
                    tracing::debug!("summarizer not ready: {error}");
                    sleep(self.retry.delay).await;
                }
            }
        }

        None
    }
}

#[async_trait::async_trait]
impl Tool for SummarizerTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: NAME.to_string(),
            description: DESCRIPTION.to_string(),
            input_schema: json_schema_object(
                json!({
                    "key": json_schema_string(
                        "The summarizer key returned by brave_web_search when the summary parameter is enabled."
                    ),
                    "entity_info": json_schema_boolean(
                        "Returns extra entities info with the summary response."
                    ),
                    "inline_references": json_schema_boolean(
                        "Adds inline references to the summary response."
                    ),
                }),
                vec!["key"],
            ),
            annotations: Some(open_world_annotations("Brave Summarizer")),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let params = args_object(arguments)?;
        if !params.get("key").map_or(false, |key| key.is_string()) {
            return Ok(CallToolResult::error("The summarizer key is required"));
        }

        let Some(response) = self.poll(params).await else {
            return Ok(CallToolResult::error(UNAVAILABLE));
        };

        let text = assemble_summary(&response);
        if text.is_empty() {
            return Ok(CallToolResult::error(UNAVAILABLE));
        }

        Ok(CallToolResult::success(vec![ToolContent::text(text)]))
    }
}

/// Concatenates token parts verbatim and renders inline references as
/// ` (url)`; every other part type contributes nothing.
fn assemble_summary(response: &SummarizerResponse) -> String {
    let Some(parts) = &response.summary else {
        return String::new();
    };

    let mut text = String::new();
    for part in parts {
        match part.kind.as_str() {
            "token" => {
                if let Some(token) = part.data.as_ref().and_then(Value::as_str) {
                    text.push_str(token);
                }
            }
            "inline_reference" => {
                if let Some(url) = part
                    .data
                    .as_ref()
                    .and_then(|data| data.get("url"))
                    .and_then(Value::as_str)
                {
                    text.push_str(&format!(" ({url})"));
                }
            }
            _ => {}
        }
    }

    text
}
