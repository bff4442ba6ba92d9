// News search tool

use crate::protocol::{CallToolResult, ToolContent, ToolSchema};
use crate::tools::{
    args_object, json_schema_array, json_schema_boolean, json_schema_number,
    json_schema_object, json_schema_string, open_world_annotations, stringify, Tool,
};
use anyhow::Result;
use brave_api::SearchApi;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

pub const NAME: &str = "brave_news_search";

const DESCRIPTION: &str = "Searches for news articles using Brave's News Search API. \
    Use it for current news information, breaking news updates, or articles about \
    specific topics, events, or entities. Returns a JSON list of news results with \
    title, url, and description; some results carry snippets of article text.";

pub struct NewsSearchTool {
    api: Arc<dyn SearchApi>,
}

impl NewsSearchTool {
    pub fn new(api: Arc<dyn SearchApi>) -> Self {
        Self { api }
    }
}

#[derive(Serialize)]
struct FormattedNews<'a> {
    url: &'a str,
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    age: Option<&'a String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_age: Option<&'a String>,
    breaking: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    extra_snippets: Option<&'a Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thumbnail: Option<&'a String>,
}

#[async_trait::async_trait]
impl Tool for NewsSearchTool {
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
                    "extra_snippets": json_schema_boolean(
                        "Return up to 5 additional, alternative excerpts per result. Requires a paid plan."
                    ),
                    "goggles": json_schema_array(
                        json!({ "type": "string" }),
                        "Goggles act as a custom re-ranking on top of Brave's search index."
                    ),
                }),
                vec!["query"],
            ),
            annotations: Some(open_world_annotations("Brave News Search")),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let params = args_object(arguments)?;
        let response = self.api.news_search(params).await?;

        let content = response
            .results
            .iter()
            .map(|result| {
                ToolContent::text(stringify(&FormattedNews {
                    url: &result.url,
                    title: &result.title,
                    age: result.age.as_ref(),
                    page_age: result.page_age.as_ref(),
                    breaking: result.breaking,
                    description: result.description.as_ref(),
                    extra_snippets: result.extra_snippets.as_ref(),
                    thumbnail: result.thumbnail.as_ref().map(|t| &t.src),
                }))
            })
            .collect();

        Ok(CallToolResult::success(content))
    }
}
