// Video search tool

use crate::protocol::{CallToolResult, ToolContent, ToolSchema};
use crate::tools::{
    args_object, json_schema_boolean, json_schema_number, json_schema_object,
    json_schema_string, open_world_annotations, stringify, Tool,
};
use anyhow::Result;
use brave_api::SearchApi;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

pub const NAME: &str = "brave_video_search";

const DESCRIPTION: &str = "Searches for videos using Brave's Video Search API and \
    returns structured video results with metadata. Returns a JSON list of video \
    results with title, url, description, duration, and thumbnail_url.";

pub struct VideoSearchTool {
    api: Arc<dyn SearchApi>,
}

impl VideoSearchTool {
    pub fn new(api: Arc<dyn SearchApi>) -> Self {
        Self { api }
    }
}

#[derive(Serialize)]
struct FormattedVideo<'a> {
    url: &'a str,
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration: Option<&'a String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thumbnail_url: Option<&'a String>,
}

#[async_trait::async_trait]
impl Tool for VideoSearchTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: NAME.to_string(),
            description: DESCRIPTION.to_string(),
            input_schema: json_schema_object(
                json!({
                    "query": json_schema_string("Search query (max 400 chars, 50 words)"),
                    "country": json_schema_string(
                        "Search query country, where the results come from. 2-character country code."
                    ),
                    "search_lang": json_schema_string(
                        "Search language preference. The 2 or more character language code for which the search results are provided."
                    ),
                    "ui_lang": json_schema_string("User interface language preferred in response."),
                    "count": json_schema_number("Number of results (1-50, default 20)"),
                    "offset": json_schema_number("Pagination offset (max 9, default 0)"),
                    "spellcheck": json_schema_boolean("Whether to spellcheck the provided query."),
                    "safesearch": json_schema_string(
                        "Filters search results for adult content: 'off', 'moderate' (default), or 'strict'."
                    ),
                    "freshness": json_schema_string(
                        "Filters search results by when they were discovered: 'pd', 'pw', 'pm', 'py', or a 'YYYY-MM-DDtoYYYY-MM-DD' range."
                    ),
                }),
                vec!["query"],
            ),
            annotations: Some(open_world_annotations("Brave Video Search")),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let params = args_object(arguments)?;
        let response = self.api.video_search(params).await?;

        // An empty result list is an empty content sequence, not an error
        let content = response
            .results
            .iter()
            .map(|result| {
                ToolContent::text(stringify(&FormattedVideo {
                    url: &result.url,
                    title: &result.title,
                    description: result.description.as_ref(),
                    duration: result.video.as_ref().and_then(|v| v.duration.as_ref()),
                    thumbnail_url: result.thumbnail.as_ref().map(|t| &t.src),
                }))
            })
            .collect();

        Ok(CallToolResult::success(content))
    }
}
