//! FRED series observations tool.
//!
//! Fetches the data values of one series (`/series/observations`) and
//! returns the `observations` array of the response untouched.

use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use super::client::{Endpoint, FredClient, FredQuery};
use super::common::{DATE_SEPARATOR, SortOrder, deserialize_count, parse_arguments};
use crate::domains::tools::ToolError;

/// Output types understood by FRED (`1` through `4`).
const OUTPUT_TYPES: std::ops::RangeInclusive<u8> = 1..=4;

/// Frequency to aggregate observations into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
pub enum Frequency {
    #[serde(rename = "d")]
    Daily,
    #[serde(rename = "w")]
    Weekly,
    #[serde(rename = "bw")]
    Biweekly,
    #[serde(rename = "m")]
    Monthly,
    #[serde(rename = "q")]
    Quarterly,
    #[serde(rename = "sa")]
    Semiannual,
    #[serde(rename = "a")]
    Annual,
}

impl Frequency {
    /// Value sent as `frequency`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "d",
            Self::Weekly => "w",
            Self::Biweekly => "bw",
            Self::Monthly => "m",
            Self::Quarterly => "q",
            Self::Semiannual => "sa",
            Self::Annual => "a",
        }
    }
}

/// How observations are combined when a lower frequency is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum AggregationMethod {
    Avg,
    Sum,
    Eop,
}

impl AggregationMethod {
    /// Value sent as `aggregation_method`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Avg => "avg",
            Self::Sum => "sum",
            Self::Eop => "eop",
        }
    }
}

/// Parameters for series observations.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FredSeriesParams {
    /// FRED series identifier, e.g. `GDP` or `UNRATE`.
    #[schemars(description = "The FRED series ID")]
    pub series_id: String,

    #[schemars(description = "Start of the observation period (YYYY-MM-DD)")]
    pub start_date: Option<String>,

    #[schemars(description = "End of the observation period (YYYY-MM-DD)")]
    pub end_date: Option<String>,

    #[schemars(description = "Sort observations in ascending or descending date order")]
    pub sort_order: Option<SortOrder>,

    #[schemars(description = "Maximum number of observations to return")]
    #[serde(default, deserialize_with = "deserialize_count")]
    #[schemars(with = "Option<u32>")]
    pub limit: Option<u32>,

    #[schemars(description = "Number of observations to skip")]
    #[serde(default, deserialize_with = "deserialize_count")]
    #[schemars(with = "Option<u32>")]
    pub offset: Option<u32>,

    #[schemars(description = "Frequency to aggregate observations into")]
    pub frequency: Option<Frequency>,

    #[schemars(description = "Aggregation method used with a lower frequency")]
    pub aggregation_method: Option<AggregationMethod>,

    /// 1: real-time period, 2: vintage dates all observations,
    /// 3: vintage dates new and revised, 4: initial release only.
    #[schemars(
        description = "Output type: 1 real-time period, 2 all observations by vintage date, 3 new and revised by vintage date, 4 initial release only",
        extend("enum" = [1, 2, 3, 4])
    )]
    pub output_type: Option<u8>,

    #[schemars(description = "Vintage dates to retrieve (YYYY-MM-DD)")]
    pub vintage_dates: Option<Vec<String>>,
}

impl FredSeriesParams {
    /// Reject values the schema enumerates but serde cannot express.
    pub fn validate(&self) -> Result<(), ToolError> {
        match self.output_type {
            Some(output_type) if !OUTPUT_TYPES.contains(&output_type) => {
                Err(ToolError::invalid_arguments(format!(
                    "outputType must be one of 1, 2, 3, 4 (got {})",
                    output_type
                )))
            }
            _ => Ok(()),
        }
    }
}

/// FRED Series Observations Tool implementation.
#[derive(Debug, Clone)]
pub struct FredSeriesTool;

impl FredSeriesTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "series";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Fetch observations (data values) for a FRED economic data series";

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<FredSeriesParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Translate parameters into the `/series/observations` query.
    pub fn build_query(client: &FredClient, params: &FredSeriesParams) -> FredQuery {
        let mut query = client.query("series_id", params.series_id.as_str());
        query.push_opt("observation_start", params.start_date.as_deref());
        query.push_opt("observation_end", params.end_date.as_deref());
        query.push_opt("sort_order", params.sort_order.map(SortOrder::as_str));
        query.push_opt("limit", params.limit);
        query.push_opt("offset", params.offset);
        query.push_opt("frequency", params.frequency.map(Frequency::as_str));
        query.push_opt(
            "aggregation_method",
            params.aggregation_method.map(AggregationMethod::as_str),
        );
        query.push_opt("output_type", params.output_type);
        query.push_list(
            "vintage_dates",
            params.vintage_dates.as_deref(),
            DATE_SEPARATOR,
        );
        query
    }

    /// Execute the request and return the `observations` field.
    pub async fn execute(
        client: &FredClient,
        params: &FredSeriesParams,
    ) -> Result<Option<Value>, ToolError> {
        params.validate()?;
        info!("Fetching FRED observations for series: {}", params.series_id);
        let query = Self::build_query(client, params);
        client.fetch(Endpoint::SeriesObservations, &query).await
    }

    /// Deserialize raw arguments and execute.
    pub async fn call(
        client: &FredClient,
        arguments: JsonObject,
    ) -> Result<Option<Value>, ToolError> {
        let params: FredSeriesParams = parse_arguments(arguments)?;
        Self::execute(client, &params).await
    }
}
