// Local business/place search tool

use crate::protocol::{CallToolResult, ToolContent, ToolSchema};
use crate::tools::web::{format_web_results, web_search_properties};
use crate::tools::{args_object, json_schema_object, open_world_annotations, stringify, Tool};
use anyhow::Result;
use brave_api::types::{DayHoursEntry, LocationDescription, LocationResult, OpeningHours};
use brave_api::SearchApi;
use serde_json::{json, Map, Value};
use std::sync::Arc;

pub const NAME: &str = "brave_local_search";

const DESCRIPTION: &str = "Searches for local businesses and places using Brave's Local \
    Search API. Best for queries related to physical locations, businesses, restaurants, \
    and services. Returns detailed information including business names and addresses, \
    ratings and review counts, phone numbers and opening hours. Use this when the query \
    implies 'near me', 'in my area', or mentions specific locations. Automatically falls \
    back to brave_web_search if no local results are found. Requires a Pro plan.";

/// Description lookups accept at most this many location ids per request;
/// extra locations are dropped silently.
const MAX_DESCRIPTION_IDS: usize = 20;

const FALLBACK_TEXT: &str = "No location data was returned. Either the user's plan does \
    not support local search, or the API was unable to find locations for the provided \
    query. Falling back to general web search.";

const NO_RESULTS_TEXT: &str = "No location data was returned. User's plan does not \
    support local search, or the query may be unclear.";

pub struct LocalSearchTool {
    api: Arc<dyn SearchApi>,
}

impl LocalSearchTool {
    pub fn new(api: Arc<dyn SearchApi>) -> Self {
        Self { api }
    }
}

#[async_trait::async_trait]
impl Tool for LocalSearchTool {
    fn schema(&self) -> ToolSchema {
        // Same parameter surface as the web search tool
        ToolSchema {
            name: NAME.to_string(),
            description: DESCRIPTION.to_string(),
            input_schema: json_schema_object(web_search_properties(), vec!["query"]),
            annotations: Some(open_world_annotations("Brave Local Search")),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let mut params = args_object(arguments)?;
        ensure_location_filters(&mut params);

        // A web search first, to retrieve candidate location ids
        let response = self.api.web_search(params).await?;

        let locations: &[LocationResult] = response
            .locations
            .as_ref()
            .map(|l| l.results.as_slice())
            .unwrap_or_default();

        let ids: Vec<String> = locations
            .iter()
            .filter_map(|poi| poi.id.clone())
            .take(MAX_DESCRIPTION_IDS)
            .collect();

        // No locations: the plan may not include the Local API, or the
        // query was not location-sensitive. Never an error.
        if ids.is_empty() {
            if let Some(web) = response.web.as_ref().filter(|w| !w.results.is_empty()) {
                let mut content = vec![ToolContent::text(FALLBACK_TEXT)];
                for entry in format_web_results(web) {
                    content.push(ToolContent::text(stringify(&entry)));
                }
                return Ok(CallToolResult::success(content));
            }

            return Ok(CallToolResult::success(vec![ToolContent::text(
                NO_RESULTS_TEXT,
            )]));
        }

        let descriptions = self.api.local_descriptions(ids).await?;

        let content = format_local_results(locations, &descriptions.results)
            .into_iter()
            .map(ToolContent::text)
            .collect();

        Ok(CallToolResult::success(content))
    }
}

/// The upstream call must request both `web` and `locations` sections, on
/// top of whatever filters the caller asked for.
fn ensure_location_filters(params: &mut Map<String, Value>) {
    let mut filters = params
        .get("result_filter")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    filters.push(json!("web"));
    filters.push(json!("locations"));

    params.insert("result_filter".to_string(), Value::Array(filters));
}

fn format_local_results(
    pois: &[LocationResult],
    descriptions: &[LocationDescription],
) -> Vec<String> {
    pois.iter()
        .map(|poi| {
            let description = poi.id.as_ref().and_then(|id| {
                descriptions
                    .iter()
                    .find(|d| &d.id == id)
                    .and_then(|d| d.description.as_ref())
            });

            let mut entry = Map::new();
            insert_defined(&mut entry, "name", poi.title.as_ref().map(|t| json!(t)));
            insert_defined(
                &mut entry,
                "price_range",
                poi.price_range.as_ref().map(|p| json!(p)),
            );
            insert_defined(
                &mut entry,
                "phone",
                poi.contact
                    .as_ref()
                    .and_then(|c| c.telephone.as_ref())
                    .map(|p| json!(p)),
            );
            insert_defined(
                &mut entry,
                "rating",
                poi.rating
                    .as_ref()
                    .and_then(|r| r.rating_value)
                    .map(|r| json!(r)),
            );
            insert_defined(
                &mut entry,
                "hours",
                poi.opening_hours.as_ref().map(format_opening_hours),
            );
            insert_defined(
                &mut entry,
                "rating_count",
                poi.rating
                    .as_ref()
                    .and_then(|r| r.review_count)
                    .map(|c| json!(c)),
            );
            insert_defined(&mut entry, "description", description.map(|d| json!(d)));
            insert_defined(
                &mut entry,
                "address",
                poi.postal_address
                    .as_ref()
                    .and_then(|a| a.display_address.as_ref())
                    .map(|a| json!(a)),
            );

            stringify(&Value::Object(entry))
        })
        .collect()
}

fn insert_defined(entry: &mut Map<String, Value>, key: &str, value: Option<Value>) {
    if let Some(value) = value {
        entry.insert(key.to_string(), value);
    }
}

/// Normalize opening hours into a day -> "HH:MM-HH:MM[, ...]" map, with a
/// "today (...)" entry first when the API provides the current day.
fn format_opening_hours(hours: &OpeningHours) -> Value {
    let mut day_hours: Vec<(String, Vec<String>)> = Vec::new();

    if let Some(first) = hours.current_day.first() {
        let ranges = hours
            .current_day
            .iter()
            .map(|d| format!("{}-{}", d.opens, d.closes))
            .collect();
        day_hours.push((format!("today ({})", first.full_name.to_lowercase()), ranges));
    }

    for entry in &hours.days {
        let parts: &[_] = match entry {
            DayHoursEntry::One(day) => std::slice::from_ref(day),
            DayHoursEntry::Many(days) => days.as_slice(),
        };

        for day in parts {
            let name = day.full_name.to_lowercase();
            let range = format!("{}-{}", day.opens, day.closes);

            match day_hours.iter_mut().find(|(n, _)| *n == name) {
                Some((_, ranges)) => ranges.push(range),
                None => day_hours.push((name, vec![range])),
            }
        }
    }

    let mut formatted = Map::new();
    for (name, ranges) in day_hours {
        formatted.insert(name, json!(ranges.join(", ")));
    }

    Value::Object(formatted)
}
