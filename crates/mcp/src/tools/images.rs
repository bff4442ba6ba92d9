// Image search tool

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

pub const NAME: &str = "brave_image_search";

const DESCRIPTION: &str = "Performs an image search using the Brave Search API. Helpful \
    when you need pictures of people, places, or things, ideas for graphic design, or \
    inspiration for art. Each result pairs a JSON description with the inline image data.";

pub struct ImageSearchTool {
    api: Arc<dyn SearchApi>,
}

impl ImageSearchTool {
    pub fn new(api: Arc<dyn SearchApi>) -> Self {
        Self { api }
    }
}

#[derive(Serialize)]
struct FormattedImageResult<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_url: Option<&'a String>,
    image_url: &'a str,
}

#[async_trait::async_trait]
impl Tool for ImageSearchTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: NAME.to_string(),
            description: DESCRIPTION.to_string(),
            input_schema: json_schema_object(
                json!({
                    "query": json_schema_string(
                        "The user's search query. Cannot be empty. Limited to 400 characters and 50 words."
                    ),
                    "country": json_schema_string(
                        "Search query country, where the results come from. 2-character country code."
                    ),
                    "search_lang": json_schema_string(
                        "Search language preference. The 2 or more character language code for which the search results are provided."
                    ),
                    "count": json_schema_number("Number of results (1-200, default 50)"),
                    "safesearch": json_schema_string(
                        "Filters search results for adult content: 'off' or 'strict' (default)."
                    ),
                    "spellcheck": json_schema_boolean("Whether to spellcheck the provided query."),
                }),
                vec!["query"],
            ),
            annotations: Some(open_world_annotations("Brave Image Search")),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let params = args_object(arguments)?;
        let response = self.api.image_search(params).await?;

        let mut content = Vec::new();

        for result in &response.results {
            // Skip results without an image
            let Some(thumbnail) = result.thumbnail.as_ref().filter(|t| !t.src.is_empty())
            else {
                continue;
            };

            // Prefer the property URL, it is the shortest form
            let image_url = result
                .properties
                .as_ref()
                .and_then(|p| p.url.as_deref())
                .unwrap_or(&thumbnail.src);

            match self.api.fetch_image(image_url).await {
                Ok(image) => {
                    content.push(ToolContent::text(stringify(&FormattedImageResult {
                        title: result.title.as_ref(),
                        page_url: result.url.as_ref(),
                        image_url,
                    })));
                    content.push(ToolContent::image(image.data, image.mime_type));
                }
                Err(error) => {
                    // One bad image must not abort the rest
                    tracing::error!("error fetching image data from {image_url}: {error}");
                }
            }
        }

        Ok(CallToolResult::success(content))
    }
}
