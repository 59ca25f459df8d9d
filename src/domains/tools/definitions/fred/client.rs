//! FRED HTTP client shared by the FRED tools.
//!
//! Every request is a single GET carrying `file_type=json` and the configured
//! API key. Only one named field of the JSON body is handed back to the tool;
//! the rest of the payload is discarded.

use std::sync::Arc;

use hyper::ext::ReasonPhrase;
use reqwest::Response;
use serde_json::Value;
use tracing::{debug, warn};

use crate::core::config::FredConfig;
use crate::domains::tools::ToolError;

/// Response format requested from FRED on every call.
const FILE_TYPE: &str = "json";

/// FRED endpoints used by the tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `/series/search` - full text search over series metadata.
    SeriesSearch,
    /// `/series/observations` - data values of one series.
    SeriesObservations,
}

impl Endpoint {
    /// Path relative to the API base URL.
    pub fn path(self) -> &'static str {
        match self {
            Self::SeriesSearch => "/series/search",
            Self::SeriesObservations => "/series/observations",
        }
    }

    /// Name of the response field projected out of the JSON body.
    pub fn result_field(self) -> &'static str {
        match self {
            Self::SeriesSearch => "seriess",
            Self::SeriesObservations => "observations",
        }
    }
}

/// Ordered query string parameters for one FRED request.
///
/// Pairs are encoded in insertion order. Absent values are never pushed,
/// so upstream defaults apply to them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FredQuery {
    pairs: Vec<(&'static str, String)>,
}

impl FredQuery {
    /// Append a parameter.
    pub fn push(&mut self, key: &'static str, value: impl Into<String>) {
        self.pairs.push((key, value.into()));
    }

    /// Append a parameter only when a value is present.
    pub fn push_opt<T: ToString>(&mut self, key: &'static str, value: Option<T>) {
        if let Some(value) = value {
            self.push(key, value.to_string());
        }
    }

    /// Append a list parameter joined by `separator`.
    ///
    /// An empty list is still present and yields an empty value.
    pub fn push_list(&mut self, key: &'static str, values: Option<&[String]>, separator: &str) {
        if let Some(values) = values {
            self.push(key, values.join(separator));
        }
    }

    /// Look up the first value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Parameter names in encoding order.
    pub fn keys(&self) -> Vec<&'static str> {
        self.pairs.iter().map(|(k, _)| *k).collect()
    }

    /// Encode as an `application/x-www-form-urlencoded` query string.
    pub fn encode(&self) -> Result<String, ToolError> {
        serde_urlencoded::to_string(&self.pairs)
            .map_err(|e| ToolError::internal(format!("Failed to encode query: {}", e)))
    }

    /// Query string with the API key masked, for logging.
    fn redacted(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| {
                if *k == "api_key" {
                    format!("{}=[REDACTED]", k)
                } else {
                    format!("{}={}", k, v)
                }
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Client for the FRED web API.
#[derive(Debug, Clone)]
pub struct FredClient {
    http: reqwest::Client,
    config: Arc<FredConfig>,
}

impl FredClient {
    /// Create a client for the given FRED configuration.
    ///
    /// No request timeout is set; the transport default applies.
    pub fn new(config: Arc<FredConfig>) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self { http, config })
    }

    /// Start a query with its primary parameter, followed by the response
    /// format and the API key.
    pub fn query(&self, key: &'static str, value: impl Into<String>) -> FredQuery {
        let mut query = FredQuery::default();
        query.push(key, value);
        query.push("file_type", FILE_TYPE);
        query.push("api_key", self.config.api_key.clone());
        query
    }

    /// Issue one GET against `endpoint` and return its result field.
    ///
    /// Returns `Ok(None)` when the body lacks the field. A non-success
    /// status fails with the status text of the response.
    pub async fn fetch(
        &self,
        endpoint: Endpoint,
        query: &FredQuery,
    ) -> Result<Option<Value>, ToolError> {
        let url = format!(
            "{}{}?{}",
            self.config.base_url,
            endpoint.path(),
            query.encode()?
        );
        debug!("GET {}?{}", endpoint.path(), query.redacted());

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(ToolError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let status_text = status_text(&response);
            warn!("FRED {} returned {}", endpoint.path(), status);
            return Err(ToolError::Upstream(status_text));
        }

        let mut body: Value = response.json().await.map_err(ToolError::transport)?;

        Ok(body.get_mut(endpoint.result_field()).map(Value::take))
    }
}

/// Reason phrase from the status line.
///
/// hyper only records the phrase when it differs from the canonical one, so
/// the canonical phrase (or the bare code) is the fallback.
fn status_text(response: &Response) -> String {
    let status = response.status();
    response
        .extensions()
        .get::<ReasonPhrase>()
        .map(|phrase| String::from_utf8_lossy(phrase.as_bytes()).into_owned())
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| status.as_str().to_string())
}
