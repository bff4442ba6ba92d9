// Search tools exposed over MCP

mod registry;

pub mod images;
pub mod local;
pub mod news;
pub mod summarizer;
pub mod videos;
pub mod web;

pub use images::ImageSearchTool;
pub use local::LocalSearchTool;
pub use news::NewsSearchTool;
pub use registry::*;
pub use summarizer::SummarizerTool;
pub use videos::VideoSearchTool;
pub use web::WebSearchTool;

use brave_api::SearchApi;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Build the registry of all search tools backed by `api`.
pub fn default_registry(api: Arc<dyn SearchApi>) -> anyhow::Result<ToolRegistry> {
    let mut registry = ToolRegistry::new();

    registry.register(Arc::new(WebSearchTool::new(api.clone())))?;
    registry.register(Arc::new(LocalSearchTool::new(api.clone())))?;
    registry.register(Arc::new(VideoSearchTool::new(api.clone())))?;
    registry.register(Arc::new(ImageSearchTool::new(api.clone())))?;
    registry.register(Arc::new(NewsSearchTool::new(api.clone())))?;
    registry.register(Arc::new(SummarizerTool::new(api)))?;

    Ok(registry)
}

/// Tool arguments arrive as an arbitrary JSON value; tools expect an
/// object (or nothing).
pub(crate) fn args_object(arguments: Value) -> anyhow::Result<Map<String, Value>> {
    match arguments {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => anyhow::bail!("tool arguments must be an object, got: {other}"),
    }
}

/// Compact JSON used for text content items. `None` fields are omitted by
/// the formatting structs, so the output carries only defined values.
pub(crate) fn stringify<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

#[cfg(test)]
pub(crate) mod testing {
    use brave_api::error::{ApiError, Result};
    use brave_api::types::*;
    use brave_api::{FetchedImage, SearchApi};
    use serde_json::{Map, Value};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// A scripted response: either a payload or a stubbed upstream failure.
    pub(crate) enum Scripted<T> {
        Ok(T),
        Fail,
    }

    /// Stub upstream API: each endpoint pops scripted responses in order;
    /// the last entry repeats once the queue is down to one, so polling
    /// loops can run longer than the script.
    #[derive(Default)]
    pub(crate) struct StubApi {
        pub web: Mutex<VecDeque<Scripted<WebSearchResponse>>>,
        pub images: Mutex<VecDeque<Scripted<ImageSearchResponse>>>,
        pub videos: Mutex<VecDeque<Scripted<VideoSearchResponse>>>,
        pub news: Mutex<VecDeque<Scripted<NewsSearchResponse>>>,
        pub descriptions: Mutex<VecDeque<Scripted<LocalDescriptionsResponse>>>,
        pub summaries: Mutex<VecDeque<Scripted<SummarizerResponse>>>,
        pub fetched: Mutex<VecDeque<Scripted<FetchedImage>>>,
        /// Method-call log, in order.
        pub calls: Mutex<Vec<String>>,
        /// Params passed to the most recent web search.
        pub last_web_params: Mutex<Option<Map<String, Value>>>,
        /// Ids passed to the most recent description lookup.
        pub last_description_ids: Mutex<Option<Vec<String>>>,
    }

    fn stub_failure() -> ApiError {
        ApiError::Http {
            status: 500,
            status_text: "Internal Server Error".to_string(),
            body: "stubbed failure".to_string(),
        }
    }

    fn next<T: Clone>(queue: &Mutex<VecDeque<Scripted<T>>>) -> Result<T> {
        let mut queue = queue.lock().unwrap();
        let scripted = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().map(|s| match s {
                Scripted::Ok(v) => Scripted::Ok(v.clone()),
                Scripted::Fail => Scripted::Fail,
            })
        };

        match scripted {
            Some(Scripted::Ok(value)) => Ok(value),
            Some(Scripted::Fail) | None => Err(stub_failure()),
        }
    }

    impl StubApi {
        fn record(&self, method: &str) {
            self.calls.lock().unwrap().push(method.to_string());
        }

        pub(crate) fn call_count(&self, method: &str) -> usize {
            self.calls.lock().unwrap().iter().filter(|m| *m == method).count()
        }
    }

    #[async_trait::async_trait]
    impl SearchApi for StubApi {
        async fn web_search(&self, params: Map<String, Value>) -> Result<WebSearchResponse> {
            self.record("web_search");
            *self.last_web_params.lock().unwrap() = Some(params);
            next(&self.web)
        }

        async fn image_search(&self, _params: Map<String, Value>) -> Result<ImageSearchResponse> {
            self.record("image_search");
            next(&self.images)
        }

        async fn video_search(&self, _params: Map<String, Value>) -> Result<VideoSearchResponse> {
            self.record("video_search");
            next(&self.videos)
        }

        async fn news_search(&self, _params: Map<String, Value>) -> Result<NewsSearchResponse> {
            self.record("news_search");
            next(&self.news)
        }

        async fn local_descriptions(
            &self,
            ids: Vec<String>,
        ) -> Result<LocalDescriptionsResponse> {
            self.record("local_descriptions");
            *self.last_description_ids.lock().unwrap() = Some(ids);
            next(&self.descriptions)
        }

        async fn summarize(&self, _params: Map<String, Value>) -> Result<SummarizerResponse> {
            self.record("summarize");
            next(&self.summaries)
        }

        async fn fetch_image(&self, _url: &str) -> Result<FetchedImage> {
            self.record("fetch_image");
            next(&self.fetched)
        }
    }

    pub(crate) fn text_items(result: &crate::protocol::CallToolResult) -> Vec<String> {
        result
            .content
            .iter()
            .filter_map(|item| match item {
                crate::protocol::ToolContent::Text { text } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }
}
