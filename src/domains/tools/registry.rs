//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - The ordered list of tool descriptors
//! - Dispatch of tool calls by name
//! - Normalization of every outcome into a `CallToolResult` envelope

use std::sync::Arc;

use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use serde_json::Value;
use tracing::{info, warn};

use crate::core::config::FredConfig;

use super::ToolError;
use super::definitions::{FredClient, FredSearchTool, FredSeriesTool};

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - manages all available tools.
///
/// Built once at startup. Holds no per-call state, so calls may run
/// concurrently against a shared instance.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    client: FredClient,
}

impl ToolRegistry {
    /// Create a new tool registry backed by the given FRED configuration.
    pub fn new(config: Arc<FredConfig>) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: FredClient::new(config)?,
        })
    }

    /// Get all tool names, in registration order.
    pub fn tool_names() -> Vec<&'static str> {
        vec![FredSearchTool::NAME, FredSeriesTool::NAME]
    }

    /// Get all tools as Tool models (metadata), in registration order.
    ///
    /// This is the single source of truth for all available tools.
    pub fn list_tools(&self) -> Vec<Tool> {
        vec![FredSearchTool::to_tool(), FredSeriesTool::to_tool()]
    }

    /// Call a tool by name and wrap the outcome in an envelope.
    ///
    /// Never fails: unknown tools and handler errors become error results.
    pub async fn call_tool(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        let arguments = arguments.unwrap_or_default();

        let outcome = match name {
            FredSearchTool::NAME => FredSearchTool::call(&self.client, arguments).await,
            FredSeriesTool::NAME => FredSeriesTool::call(&self.client, arguments).await,
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::unknown_tool(name))
            }
        };

        match outcome.and_then(|value| render(&value)) {
            Ok(text) => {
                info!("Tool {} succeeded", name);
                CallToolResult::success(vec![Content::text(text)])
            }
            Err(e) => {
                warn!("Tool {} failed: {}", name, e);
                CallToolResult::error(vec![Content::text(e.to_string())])
            }
        }
    }
}

/// Pretty-print a tool result. An absent result renders as `null`.
fn render(value: &Option<Value>) -> Result<String, ToolError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ToolError::internal(format!("Failed to serialize result: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;
    use std::collections::HashSet;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn registry_for(base_url: &str) -> ToolRegistry {
        let config = FredConfig::new("test-key").with_base_url(base_url);
        ToolRegistry::new(Arc::new(config)).unwrap()
    }

    fn args(json: Value) -> Option<JsonObject> {
        json.as_object().cloned()
    }

    fn text_of(result: &CallToolResult) -> String {
        assert_eq!(result.content.len(), 1);
        match &result.content[0].raw {
            RawContent::Text(text) => text.text.clone(),
            other => panic!("expected text content, got {:?}", other),
        }
    }

    async fn recorded_query(server: &MockServer) -> Vec<(String, String)> {
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        requests[0]
            .url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_registry_tool_names() {
        let names = ToolRegistry::tool_names();
        assert_eq!(names, vec!["search", "series"]);
    }

    #[test]
    fn test_list_tools_order_and_uniqueness() {
        let registry = registry_for("http://localhost");
        let tools = registry.list_tools();
        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert_eq!(names, ToolRegistry::tool_names());

        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
    }

    #[test]
    fn test_list_tools_required_fields() {
        let registry = registry_for("http://localhost");
        for tool in registry.list_tools() {
            let schema = Value::Object((*tool.input_schema).clone());
            let expected = match tool.name.as_ref() {
                "search" => serde_json::json!(["searchText"]),
                "series" => serde_json::json!(["seriesId"]),
                other => panic!("unexpected tool {}", other),
            };
            assert_eq!(schema["required"], expected);
            assert!(tool.description.is_some());
        }
    }

    #[tokio::test]
    async fn test_search_success_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/series/search"))
            .and(query_param("search_text", "GDP"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "seriess": [{ "id": "GDP" }]
            })))
            .mount(&server)
            .await;

        let registry = registry_for(&server.uri());
        let result = registry
            .call_tool("search", args(serde_json::json!({ "searchText": "GDP" })))
            .await;

        assert_eq!(result.is_error, Some(false));
        let parsed: Value = serde_json::from_str(&text_of(&result)).unwrap();
        assert_eq!(parsed, serde_json::json!([{ "id": "GDP" }]));

        let query = recorded_query(&server).await;
        assert_eq!(
            query,
            vec![
                ("search_text".to_string(), "GDP".to_string()),
                ("file_type".to_string(), "json".to_string()),
                ("api_key".to_string(), "test-key".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_success_text_is_pretty_printed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "seriess": [{ "id": "GDP" }]
            })))
            .mount(&server)
            .await;

        let registry = registry_for(&server.uri());
        let result = registry
            .call_tool("search", args(serde_json::json!({ "searchText": "GDP" })))
            .await;

        assert_eq!(text_of(&result), "[\n  {\n    \"id\": \"GDP\"\n  }\n]");
    }

    #[tokio::test]
    async fn test_series_vintage_dates_joined() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/series/observations"))
            .and(query_param("vintage_dates", "2020-01-01,2020-02-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "observations": [{ "date": "2020-01-01", "value": "21481.367" }]
            })))
            .mount(&server)
            .await;

        let registry = registry_for(&server.uri());
        let result = registry
            .call_tool(
                "series",
                args(serde_json::json!({
                    "seriesId": "GDP",
                    "vintageDates": ["2020-01-01", "2020-02-01"]
                })),
            )
            .await;

        assert_eq!(result.is_error, Some(false));
        let parsed: Value = serde_json::from_str(&text_of(&result)).unwrap();
        assert_eq!(parsed[0]["value"], "21481.367");
    }

    #[tokio::test]
    async fn test_empty_tag_list_is_sent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/series/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "seriess": []
            })))
            .mount(&server)
            .await;

        let registry = registry_for(&server.uri());
        let result = registry
            .call_tool(
                "search",
                args(serde_json::json!({ "searchText": "x", "tagNames": [] })),
            )
            .await;

        assert_eq!(result.is_error, Some(false));
        assert_eq!(text_of(&result), "[]");
        let query = recorded_query(&server).await;
        assert!(query.contains(&("tag_names".to_string(), String::new())));
    }

    #[tokio::test]
    async fn test_missing_result_field_passes_through() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "count": 0
            })))
            .mount(&server)
            .await;

        let registry = registry_for(&server.uri());
        let result = registry
            .call_tool("series", args(serde_json::json!({ "seriesId": "GDP" })))
            .await;

        assert_eq!(result.is_error, Some(false));
        assert_eq!(text_of(&result), "null");
    }

    #[tokio::test]
    async fn test_upstream_error_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let registry = registry_for(&server.uri());
        let result = registry
            .call_tool("search", args(serde_json::json!({ "searchText": "GDP" })))
            .await;

        assert_eq!(result.is_error, Some(true));
        assert_eq!(text_of(&result), "FRED API error: Internal Server Error");
    }

    #[tokio::test]
    async fn test_transport_error_envelope_hides_key() {
        // Nothing listens on port 1.
        let registry = registry_for("http://127.0.0.1:1");
        let result = registry
            .call_tool("series", args(serde_json::json!({ "seriesId": "GDP" })))
            .await;

        assert_eq!(result.is_error, Some(true));
        let text = text_of(&result);
        assert!(text.starts_with("FRED API error: "));
        assert!(!text.contains("test-key"));
    }

    #[tokio::test]
    async fn test_unknown_tool_envelope() {
        let registry = registry_for("http://localhost");
        let result = registry
            .call_tool("nonexistent", args(serde_json::json!({})))
            .await;

        assert_eq!(result.is_error, Some(true));
        assert_eq!(text_of(&result), "Unknown tool: nonexistent");
    }

    #[tokio::test]
    async fn test_missing_arguments_are_invalid() {
        let registry = registry_for("http://localhost");
        let result = registry.call_tool("search", None).await;

        assert_eq!(result.is_error, Some(true));
        assert!(text_of(&result).starts_with("Invalid arguments: "));
    }

    #[tokio::test]
    async fn test_identical_calls_identical_envelopes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "observations": [{ "date": "2024-01-01", "value": "3.7" }]
            })))
            .mount(&server)
            .await;

        let registry = registry_for(&server.uri());
        let arguments = args(serde_json::json!({ "seriesId": "UNRATE", "limit": 1 }));
        let first = registry.call_tool("series", arguments.clone()).await;
        let second = registry.call_tool("series", arguments).await;

        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    // Integration tests (require network and FRED_API_KEY, run with: cargo test -- --ignored)
    #[ignore]
    #[tokio::test]
    async fn test_live_search() {
        let api_key = std::env::var("FRED_API_KEY").expect("FRED_API_KEY must be set");
        let registry = ToolRegistry::new(Arc::new(FredConfig::new(api_key))).unwrap();
        let result = registry
            .call_tool(
                "search",
                args(serde_json::json!({ "searchText": "GDP", "limit": 3 })),
            )
            .await;
        assert_eq!(result.is_error, Some(false));
        assert!(text_of(&result).contains("\"id\""));
    }
}
