// Endpoint kinds and their query-string encodings

use serde_json::{Map, Value};

pub const BASE_URL: &str = "https://api.search.brave.com";

/// The fixed set of upstream search endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Web,
    Images,
    Videos,
    News,
    LocalPois,
    LocalDescriptions,
    Summarizer,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Web => "/res/v1/web/search",
            Endpoint::Images => "/res/v1/images/search",
            Endpoint::Videos => "/res/v1/videos/search",
            Endpoint::News => "/res/v1/news/search",
            Endpoint::LocalPois => "/res/v1/local/pois",
            Endpoint::LocalDescriptions => "/res/v1/local/descriptions",
            Endpoint::Summarizer => "/res/v1/summarizer/search",
        }
    }

    pub fn url(&self) -> String {
        format!("{}{}", BASE_URL, self.path())
    }

    /// Encode validated tool parameters into query-string pairs.
    ///
    /// The encoding rules are wire-compatible with the hosted API and must
    /// not be changed casually:
    /// - `query` is sent as `q`
    /// - on the two local endpoints, a list-valued `ids` becomes one
    ///   repeated `ids` pair per element
    /// - `result_filter` is forced to `summarizer` whenever `summary=true`
    ///   is also present, otherwise a non-empty list is comma-joined
    /// - `goggles` accepts a single string or a comma-joined list
    /// - every other defined parameter is stringified under its own name
    pub fn encode(&self, params: &Map<String, Value>) -> Vec<(String, String)> {
        match self {
            Endpoint::LocalPois | Endpoint::LocalDescriptions => encode_local(params),
            _ => encode_search(params),
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Endpoint::Web => "web",
            Endpoint::Images => "images",
            Endpoint::Videos => "videos",
            Endpoint::News => "news",
            Endpoint::LocalPois => "local_pois",
            Endpoint::LocalDescriptions => "local_descriptions",
            Endpoint::Summarizer => "summarizer",
        };
        write!(f, "{}", name)
    }
}

/// Encoding for the search-style endpoints (web, images, videos, news,
/// summarizer).
fn encode_search(params: &Map<String, Value>) -> Vec<(String, String)> {
    let mut pairs = Vec::new();

    for (key, value) in params {
        match key.as_str() {
            "result_filter" => {
                if params.get("summary").and_then(Value::as_bool) == Some(true) {
                    pairs.push(("result_filter".into(), "summarizer".into()));
                } else if let Some(filters) = non_empty_array(value) {
                    pairs.push(("result_filter".into(), join_strings(filters)));
                }
            }
            "goggles" => match value {
                Value::String(s) => pairs.push(("goggles".into(), s.clone())),
                Value::Array(items) if !items.is_empty() => {
                    pairs.push(("goggles".into(), join_strings(items)));
                }
                _ => {}
            },
            _ => push_plain(&mut pairs, key, value),
        }
    }

    pairs
}

/// Encoding for the local POI and description endpoints, where `ids` is a
/// repeated key.
fn encode_local(params: &Map<String, Value>) -> Vec<(String, String)> {
    let mut pairs = Vec::new();

    for (key, value) in params {
        if key == "ids" {
            match value {
                Value::Array(ids) if !ids.is_empty() => {
                    for id in ids {
                        pairs.push(("ids".into(), stringify(id)));
                    }
                }
                Value::String(id) => pairs.push(("ids".into(), id.clone())),
                _ => {}
            }
            continue;
        }

        push_plain(&mut pairs, key, value);
    }

    pairs
}

fn push_plain(pairs: &mut Vec<(String, String)>, key: &str, value: &Value) {
    if value.is_null() {
        return;
    }

    let key = if key == "query" { "q" } else { key };
    pairs.push((key.to_string(), stringify(value)));
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => join_strings(items),
        other => other.to_string(),
    }
}

fn join_strings(items: &[Value]) -> String {
    items
        .iter()
        .map(stringify)
        .collect::<Vec<_>>()
        .join(",")
}

fn non_empty_array(value: &Value) -> Option<&[Value]> {
    match value {
        Value::Array(items) if !items.is_empty() => Some(items),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn web_query_is_renamed_and_order_is_stable() {
        let pairs = Endpoint::Web.encode(&params(json!({
            "query": "cats",
            "count": 5,
        })));

        assert_eq!(
            pairs,
            vec![
                ("q".to_string(), "cats".to_string()),
                ("count".to_string(), "5".to_string()),
            ]
        );
    }

    #[test]
    fn local_ids_list_becomes_repeated_pairs() {
        let pairs = Endpoint::LocalPois.encode(&params(json!({ "ids": ["a", "b"] })));

        assert_eq!(
            pairs,
            vec![
                ("ids".to_string(), "a".to_string()),
                ("ids".to_string(), "b".to_string()),
            ]
        );
    }

    #[test]
    fn local_single_id_string_is_a_single_pair() {
        let pairs =
            Endpoint::LocalDescriptions.encode(&params(json!({ "ids": "only-one" })));
        assert_eq!(pairs, vec![("ids".to_string(), "only-one".to_string())]);
    }

    #[test]
    fn local_empty_ids_are_omitted() {
        let pairs = Endpoint::LocalPois.encode(&params(json!({ "ids": [] })));
        assert!(pairs.is_empty());
    }

    #[test]
    fn summary_forces_result_filter_to_summarizer() {
        let pairs = Endpoint::Web.encode(&params(json!({
            "summary": true,
            "result_filter": ["news"],
        })));

        assert!(pairs.contains(&("result_filter".to_string(), "summarizer".to_string())));
        assert!(!pairs.iter().any(|(_, v)| v.contains("news")));
    }

    #[test]
    fn result_filter_list_is_comma_joined() {
        let pairs = Endpoint::Web.encode(&params(json!({
            "result_filter": ["web", "locations"],
        })));

        assert_eq!(
            pairs,
            vec![("result_filter".to_string(), "web,locations".to_string())]
        );
    }

    #[test]
    fn empty_result_filter_is_omitted() {
        let pairs = Endpoint::Web.encode(&params(json!({ "result_filter": [] })));
        assert!(pairs.is_empty());
    }

    #[test]
    fn goggles_string_and_list_forms() {
        let pairs = Endpoint::Web.encode(&params(json!({
            "goggles": "https://example.com/goggle",
        })));
        assert_eq!(
            pairs,
            vec![(
                "goggles".to_string(),
                "https://example.com/goggle".to_string()
            )]
        );

        let pairs = Endpoint::Web.encode(&params(json!({ "goggles": ["a", "b"] })));
        assert_eq!(pairs, vec![("goggles".to_string(), "a,b".to_string())]);
    }

    #[test]
    fn null_values_are_omitted_and_booleans_stringified() {
        let pairs = Endpoint::Web.encode(&params(json!({
            "query": "dogs",
            "spellcheck": false,
            "freshness": null,
        })));

        assert_eq!(
            pairs,
            vec![
                ("q".to_string(), "dogs".to_string()),
                ("spellcheck".to_string(), "false".to_string()),
            ]
        );
    }

    #[test]
    fn endpoint_paths_are_fixed() {
        assert_eq!(Endpoint::Web.path(), "/res/v1/web/search");
        assert_eq!(Endpoint::Summarizer.path(), "/res/v1/summarizer/search");
        assert_eq!(Endpoint::LocalPois.path(), "/res/v1/local/pois");
        assert_eq!(
            Endpoint::LocalDescriptions.url(),
            "https://api.search.brave.com/res/v1/local/descriptions"
        );
    }
}
