// Typed views of upstream API responses
//
// These models deliberately cover only the fields the tools read; everything
// else in the upstream payload is ignored on deserialization.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Thumbnail {
    pub src: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original: Option<String>,
}

// --- Web search ---

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebSearchResponse {
    pub web: Option<Search>,
    pub locations: Option<Locations>,
    pub faq: Option<Faq>,
    pub discussions: Option<Discussions>,
    pub news: Option<NewsSection>,
    pub videos: Option<VideosSection>,
    pub summarizer: Option<SummarizerKey>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Search {
    #[serde(default)]
    pub results: Vec<WebResult>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebResult {
    pub url: String,
    pub title: String,
    pub description: Option<String>,
    pub extra_snippets: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Faq {
    #[serde(default)]
    pub results: Vec<FaqResult>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FaqResult {
    pub question: String,
    pub answer: String,
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Discussions {
    #[serde(default)]
    pub results: Vec<DiscussionResult>,
    #[serde(default)]
    pub mutated_by_goggles: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscussionResult {
    pub url: String,
    /// Enriched forum-post data, passed through as-is.
    pub data: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsSection {
    #[serde(default)]
    pub results: Vec<NewsResult>,
    #[serde(default)]
    pub mutated_by_goggles: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsResult {
    pub url: String,
    pub title: String,
    pub description: Option<String>,
    pub source: Option<Value>,
    #[serde(default)]
    pub breaking: bool,
    #[serde(default)]
    pub is_live: bool,
    pub age: Option<String>,
    pub page_age: Option<String>,
    pub extra_snippets: Option<Vec<String>>,
    pub thumbnail: Option<Thumbnail>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideosSection {
    #[serde(default)]
    pub results: Vec<VideoResult>,
    #[serde(default)]
    pub mutated_by_goggles: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoResult {
    pub url: String,
    pub title: String,
    pub description: Option<String>,
    pub age: Option<String>,
    pub thumbnail: Option<Thumbnail>,
    pub video: Option<VideoData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoData {
    pub duration: Option<String>,
    pub views: Option<Value>,
    pub creator: Option<String>,
    pub publisher: Option<String>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummarizerKey {
    pub key: String,
}

// --- Locations ---

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Locations {
    #[serde(default)]
    pub results: Vec<LocationResult>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationResult {
    /// Temporary id usable for POI/description follow-ups.
    pub id: Option<String>,
    pub title: Option<String>,
    pub price_range: Option<String>,
    pub contact: Option<Contact>,
    pub rating: Option<Rating>,
    pub opening_hours: Option<OpeningHours>,
    pub postal_address: Option<PostalAddress>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Contact {
    pub telephone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Rating {
    #[serde(rename = "ratingValue")]
    pub rating_value: Option<f64>,
    #[serde(rename = "reviewCount")]
    pub review_count: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostalAddress {
    #[serde(rename = "displayAddress")]
    pub display_address: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpeningHours {
    #[serde(default)]
    pub current_day: Vec<DayHours>,
    #[serde(default)]
    pub days: Vec<DayHoursEntry>,
}

/// The upstream `days` list mixes single entries and per-day arrays.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DayHoursEntry {
    One(DayHours),
    Many(Vec<DayHours>),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DayHours {
    pub full_name: String,
    pub opens: String,
    pub closes: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocalDescriptionsResponse {
    #[serde(default)]
    pub results: Vec<LocationDescription>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationDescription {
    pub id: String,
    pub description: Option<String>,
}

// --- Images ---

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageSearchResponse {
    #[serde(default)]
    pub results: Vec<ImageResult>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageResult {
    pub url: Option<String>,
    pub title: Option<String>,
    pub thumbnail: Option<Thumbnail>,
    pub properties: Option<ImageProperties>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageProperties {
    pub url: Option<String>,
}

// --- Videos / News (standalone endpoints) ---

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoSearchResponse {
    #[serde(default)]
    pub results: Vec<VideoResult>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsSearchResponse {
    #[serde(default)]
    pub results: Vec<NewsResult>,
}

// --- Summarizer ---

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummarizerResponse {
    #[serde(default)]
    pub status: String,
    pub title: Option<String>,
    pub summary: Option<Vec<SummaryPart>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryPart {
    #[serde(rename = "type")]
    pub kind: String,
    /// A text excerpt for `token` parts, an object with a `url` for
    /// `inline_reference` parts.
    pub data: Option<Value>,
}
