// Web search tool

use crate::protocol::{CallToolResult, ToolContent, ToolSchema};
use crate::tools::{
    args_object, json_schema_array, json_schema_boolean, json_schema_number,
    json_schema_object, json_schema_string, open_world_annotations, stringify, Tool,
};
use anyhow::Result;
use brave_api::types::{Discussions, Faq, NewsSection, Search, VideosSection};
use brave_api::SearchApi;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

pub const NAME: &str = "brave_web_search";

const DESCRIPTION: &str = "Performs web searches using the Brave Search API and returns \
    comprehensive search results with rich metadata. Use for general web searches, \
    location-based queries, news, videos, discussions, and FAQ content. Returns a JSON \
    list of web results with title, description, and URL. When the result_filter \
    parameter is empty, results may also contain FAQ, Discussions, News, and Video \
    entries.";

pub struct WebSearchTool {
    api: Arc<dyn SearchApi>,
}

impl WebSearchTool {
    pub fn new(api: Arc<dyn SearchApi>) -> Self {
        Self { api }
    }
}

/// The full web-search parameter surface, shared with the local search
/// tool, which accepts the same inputs.
pub(crate) fn web_search_properties() -> Value {
    json!({
        "query": json_schema_string("Search query (max 400 chars, 50 words)"),
        "country": json_schema_string(
            "Search query country, where the results come from. 2-character country code."
        ),
        "search_lang": json_schema_string(
            "Search language preference. The 2 or more character language code for which the search results are provided."
        ),
        "ui_lang": json_schema_string("User interface language preferred in response."),
        "count": json_schema_number(
            "Number of results (1-20, default 10). Applies only to web search results."
        ),
        "offset": json_schema_number("Pagination offset (max 9, default 0)"),
        "safesearch": json_schema_string(
            "Filters search results for adult content: 'off', 'moderate' (default), or 'strict'."
        ),
        "freshness": json_schema_string(
            "Filters search results by when they were discovered: 'pd' (last 24h), 'pw' (last 7 days), 'pm' (last 31 days), 'py' (last 365 days), or a 'YYYY-MM-DDtoYYYY-MM-DD' range."
        ),
        "text_decorations": json_schema_boolean(
            "Whether display strings should include decoration markers such as highlighting characters."
        ),
        "spellcheck": json_schema_boolean("Whether to spellcheck the provided query."),
        "result_filter": json_schema_array(
            json!({ "type": "string" }),
            "Result types to include: discussions, faq, infobox, news, query, summarizer, videos, web, locations, rich."
        ),
        "goggles": json_schema_array(
            json!({ "type": "string" }),
            "Goggles act as a custom re-ranking on top of Brave's search index. Accepts hosted Goggle URLs or inline definitions."
        ),
        "units": json_schema_string("The measurement units: 'metric' or 'imperial'."),
        "extra_snippets": json_schema_boolean(
            "Return up to 5 additional, alternative excerpts per result. Requires a paid plan."
        ),
        "summary": json_schema_boolean(
            "Enables summary key generation in web search results. Required for the summarizer tool."
        ),
    })
}

#[async_trait::async_trait]
impl Tool for WebSearchTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: NAME.to_string(),
            description: DESCRIPTION.to_string(),
            input_schema: json_schema_object(web_search_properties(), vec!["query"]),
            annotations: Some(open_world_annotations("Brave Web Search")),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let params = args_object(arguments)?;
        let response = self.api.web_search(params).await?;

        let mut content = Vec::new();

        if let Some(summarizer) = &response.summarizer {
            content.push(ToolContent::text(format!(
                "Summarizer key: {}",
                summarizer.key
            )));
        }

        let no_web_results = response
            .web
            .as_ref()
            .map_or(true, |web| web.results.is_empty());

        if no_web_results {
            content.push(ToolContent::text("No web results found"));
            return Ok(CallToolResult {
                content,
                is_error: Some(true),
            });
        }

        if let Some(web) = &response.web {
            for entry in format_web_results(web) {
                content.push(ToolContent::text(stringify(&entry)));
            }
        }

        if let Some(faq) = &response.faq {
            for entry in format_faq_results(faq) {
                content.push(ToolContent::text(stringify(&entry)));
            }
        }

        if let Some(discussions) = &response.discussions {
            for entry in format_discussions_results(discussions) {
                content.push(ToolContent::text(stringify(&entry)));
            }
        }

        if let Some(news) = &response.news {
            for entry in format_news_results(news) {
                content.push(ToolContent::text(stringify(&entry)));
            }
        }

        if let Some(videos) = &response.videos {
            for entry in format_video_results(videos) {
                content.push(ToolContent::text(stringify(&entry)));
            }
        }

        Ok(CallToolResult::success(content))
    }
}

#[derive(Serialize)]
pub(crate) struct FormattedWebResult<'a> {
    pub url: &'a str,
    pub title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_snippets: Option<&'a Vec<String>>,
}

#[derive(Serialize)]
struct FormattedFaqResult<'a> {
    question: &'a str,
    answer: &'a str,
    title: &'a str,
    url: &'a str,
}

#[derive(Serialize)]
struct FormattedDiscussionResult<'a> {
    mutated_by_goggles: bool,
    url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a Value>,
}

#[derive(Serialize)]
struct FormattedNewsResult<'a> {
    mutated_by_goggles: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'a Value>,
    breaking: bool,
    is_live: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    age: Option<&'a String>,
    url: &'a str,
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    extra_snippets: Option<&'a Vec<String>>,
}

#[derive(Serialize)]
struct FormattedVideoResult<'a> {
    mutated_by_goggles: bool,
    url: &'a str,
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    age: Option<&'a String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thumbnail_url: Option<&'a String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration: Option<&'a String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    view_count: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    creator: Option<&'a String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    publisher: Option<&'a String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tags: Option<&'a Vec<String>>,
}

pub(crate) fn format_web_results(web: &Search) -> Vec<FormattedWebResult<'_>> {
    web.results
        .iter()
        .map(|result| FormattedWebResult {
            url: &result.url,
            title: &result.title,
            description: result.description.as_ref(),
            extra_snippets: result.extra_snippets.as_ref(),
        })
        .collect()
}

fn format_faq_results(faq: &Faq) -> Vec<FormattedFaqResult<'_>> {
    faq.results
        .iter()
        .map(|result| FormattedFaqResult {
            question: &result.question,
            answer: &result.answer,
            title: &result.title,
            url: &result.url,
        })
        .collect()
}

fn format_discussions_results(discussions: &Discussions) -> Vec<FormattedDiscussionResult<'_>> {
    discussions
        .results
        .iter()
        .map(|result| FormattedDiscussionResult {
            mutated_by_goggles: discussions.mutated_by_goggles,
            url: &result.url,
            data: result.data.as_ref(),
        })
        .collect()
}

fn format_news_results(news: &NewsSection) -> Vec<FormattedNewsResult<'_>> {
    news.results
        .iter()
        .map(|result| FormattedNewsResult {
            mutated_by_goggles: news.mutated_by_goggles,
            source: result.source.as_ref(),
            breaking: result.breaking,
            is_live: result.is_live,
            age: result.age.as_ref(),
            url: &result.url,
            title: &result.title,
            description: result.description.as_ref(),
            extra_snippets: result.extra_snippets.as_ref(),
        })
        .collect()
}

fn format_video_results(videos: &VideosSection) -> Vec<FormattedVideoResult<'_>> {
    videos
        .results
        .iter()
        .map(|result| {
            let video = result.video.as_ref();
            FormattedVideoResult {
                mutated_by_goggles: videos.mutated_by_goggles,
                url: &result.url,
                title: &result.title,
                description: result.description.as_ref(),
                age: result.age.as_ref(),
                thumbnail_url: result.thumbnail.as_ref().map(|t| &t.src),
                duration: video.and_then(|v| v.duration.as_ref()),
                view_count: video.and_then(|v| v.views.as_ref()),
                creator: video.and_then(|v| v.creator.as_ref()),
                publisher: video.and_then(|v| v.publisher.as_ref()),
                tags: video.and_then(|v| v.tags.as_ref()),
            }
        })
        .collect()
}
