//! Common utilities shared across FRED tools.

use rmcp::model::JsonObject;
use schemars::JsonSchema;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Number;

use crate::domains::tools::ToolError;

/// Separator for tag name lists (`tag_names`, `exclude_tag_names`).
pub const TAG_SEPARATOR: &str = ";";

/// Separator for date lists (`vintage_dates`).
pub const DATE_SEPARATOR: &str = ",";

/// Sort direction accepted by FRED endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Value sent as `sort_order`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Deserialize raw tool arguments into a typed parameter struct.
pub fn parse_arguments<T: DeserializeOwned>(arguments: JsonObject) -> Result<T, ToolError> {
    serde_json::from_value(serde_json::Value::Object(arguments))
        .map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

/// Deserialize an optional non-negative count.
///
/// Hosts often send JSON numbers as floats, so `5.0` is read as `5`.
/// Fractional, negative and out-of-range values are rejected.
pub fn deserialize_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(number) = Option::<Number>::deserialize(deserializer)? else {
        return Ok(None);
    };

    let count = match (number.as_u64(), number.as_f64()) {
        (Some(n), _) => u32::try_from(n).ok(),
        (None, Some(f)) if f.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&f) => {
            Some(f as u32)
        }
        _ => None,
    };

    count
        .map(Some)
        .ok_or_else(|| D::Error::custom(format!("expected a non-negative integer, got {number}")))
}
