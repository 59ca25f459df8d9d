//! FRED series search tool.
//!
//! Full text search over FRED series metadata (`/series/search`). The tool
//! returns the `seriess` array of the response untouched.

use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use super::client::{Endpoint, FredClient, FredQuery};
use super::common::{SortOrder, TAG_SEPARATOR, deserialize_count, parse_arguments};
use crate::domains::tools::ToolError;

/// Ordering applied to search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SearchOrderBy {
    SearchRank,
    SeriesId,
    Title,
    Units,
    Frequency,
    SeasonalAdjustment,
    RealtimeStart,
    RealtimeEnd,
    LastUpdated,
    ObservationStart,
    ObservationEnd,
    Popularity,
}

impl SearchOrderBy {
    /// Value sent as `order_by`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SearchRank => "search_rank",
            Self::SeriesId => "series_id",
            Self::Title => "title",
            Self::Units => "units",
            Self::Frequency => "frequency",
            Self::SeasonalAdjustment => "seasonal_adjustment",
            Self::RealtimeStart => "realtime_start",
            Self::RealtimeEnd => "realtime_end",
            Self::LastUpdated => "last_updated",
            Self::ObservationStart => "observation_start",
            Self::ObservationEnd => "observation_end",
            Self::Popularity => "popularity",
        }
    }
}

/// Parameters for series search.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FredSearchParams {
    /// Words to match against economic data series.
    #[schemars(description = "The words to match against economic data series")]
    pub search_text: String,

    #[schemars(description = "Maximum number of results to return")]
    #[serde(default, deserialize_with = "deserialize_count")]
    #[schemars(with = "Option<u32>")]
    pub limit: Option<u32>,

    #[schemars(description = "Order results by values of the specified attribute")]
    pub order_by: Option<SearchOrderBy>,

    #[schemars(description = "Sort results in ascending or descending order")]
    pub sort_order: Option<SortOrder>,

    #[schemars(description = "The attribute to filter results by")]
    pub filter_variable: Option<String>,

    #[schemars(description = "The value of the filter_variable attribute to filter results by")]
    pub filter_value: Option<String>,

    #[schemars(description = "Tag names that series must match")]
    pub tag_names: Option<Vec<String>>,

    #[schemars(description = "Tag names that series must not match")]
    pub exclude_tag_names: Option<Vec<String>>,
}

/// FRED Series Search Tool implementation.
#[derive(Debug, Clone)]
pub struct FredSearchTool;

impl FredSearchTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "search";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Search for FRED economic data series by keywords, tags and attributes";

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<FredSearchParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Translate parameters into the `/series/search` query.
    pub fn build_query(client: &FredClient, params: &FredSearchParams) -> FredQuery {
        let mut query = client.query("search_text", params.search_text.as_str());
        query.push_opt("limit", params.limit);
        query.push_opt("order_by", params.order_by.map(SearchOrderBy::as_str));
        query.push_opt("sort_order", params.sort_order.map(SortOrder::as_str));
        query.push_opt("filter_variable", params.filter_variable.as_deref());
        query.push_opt("filter_value", params.filter_value.as_deref());
        query.push_list("tag_names", params.tag_names.as_deref(), TAG_SEPARATOR);
        query.push_list(
            "exclude_tag_names",
            params.exclude_tag_names.as_deref(),
            TAG_SEPARATOR,
        );
        query
    }

    /// Execute the search and return the `seriess` field.
    pub async fn execute(
        client: &FredClient,
        params: &FredSearchParams,
    ) -> Result<Option<Value>, ToolError> {
        info!("Searching FRED series for: {}", params.search_text);
        let query = Self::build_query(client, params);
        client.fetch(Endpoint::SeriesSearch, &query).await
    }

    /// Deserialize raw arguments and execute.
    pub async fn call(
        client: &FredClient,
        arguments: JsonObject,
    ) -> Result<Option<Value>, ToolError> {
        let params: FredSearchParams = parse_arguments(arguments)?;
        Self::execute(client, &params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::FredConfig;
    use std::sync::Arc;

    fn test_client() -> FredClient {
        FredClient::new(Arc::new(FredConfig::new("test-key"))).unwrap()
    }

    fn params(json: Value) -> FredSearchParams {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_minimal_query() {
        let query = FredSearchTool::build_query(&test_client(), &params(serde_json::json!({
            "searchText": "GDP"
        })));
        assert_eq!(
            query.encode().unwrap(),
            "search_text=GDP&file_type=json&api_key=test-key"
        );
    }

    #[test]
    fn test_full_query_mapping() {
        let query = FredSearchTool::build_query(&test_client(), &params(serde_json::json!({
            "searchText": "unemployment rate",
            "limit": 5,
            "orderBy": "popularity",
            "sortOrder": "desc",
            "filterVariable": "frequency",
            "filterValue": "Monthly",
            "tagNames": ["usa", "nsa"],
            "excludeTagNames": ["discontinued"]
        })));

        assert_eq!(
            query.keys(),
            vec![
                "search_text",
                "file_type",
                "api_key",
                "limit",
                "order_by",
                "sort_order",
                "filter_variable",
                "filter_value",
                "tag_names",
                "exclude_tag_names",
            ]
        );
        assert_eq!(query.get("limit"), Some("5"));
        assert_eq!(query.get("order_by"), Some("popularity"));
        assert_eq!(query.get("sort_order"), Some("desc"));
        assert_eq!(query.get("filter_value"), Some("Monthly"));
        assert_eq!(query.get("tag_names"), Some("usa;nsa"));
        assert_eq!(query.get("exclude_tag_names"), Some("discontinued"));
    }

    #[test]
    fn test_float_limit_sent_as_integer() {
        let query = FredSearchTool::build_query(&test_client(), &params(serde_json::json!({
            "searchText": "GDP",
            "limit": 5.0
        })));
        assert_eq!(query.get("limit"), Some("5"));

        let result: Result<FredSearchParams, _> =
            serde_json::from_value(serde_json::json!({ "searchText": "GDP", "limit": 2.5 }));
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_tag_list_is_sent() {
        let query = FredSearchTool::build_query(&test_client(), &params(serde_json::json!({
            "searchText": "x",
            "tagNames": []
        })));
        assert_eq!(query.get("tag_names"), Some(""));
        assert_eq!(query.get("exclude_tag_names"), None);
    }

    #[test]
    fn test_order_by_values() {
        let values = [
            "search_rank",
            "series_id",
            "title",
            "units",
            "frequency",
            "seasonal_adjustment",
            "realtime_start",
            "realtime_end",
            "last_updated",
            "observation_start",
            "observation_end",
            "popularity",
        ];
        for value in values {
            let order: SearchOrderBy = serde_json::from_value(Value::from(value)).unwrap();
            assert_eq!(order.as_str(), value);
        }
    }

    #[test]
    fn test_missing_search_text_rejected() {
        let result: Result<FredSearchParams, _> =
            serde_json::from_value(serde_json::json!({ "limit": 3 }));
        assert!(result.is_err());
    }

    #[test]
    fn test_schema_shape() {
        let tool = FredSearchTool::to_tool();
        let schema = Value::Object((*tool.input_schema).clone());
        assert_eq!(schema["required"], serde_json::json!(["searchText"]));
        for field in [
            "searchText",
            "limit",
            "orderBy",
            "sortOrder",
            "filterVariable",
            "filterValue",
            "tagNames",
            "excludeTagNames",
        ] {
            assert!(
                schema["properties"].get(field).is_some(),
                "missing property {}",
                field
            );
        }
    }
}
