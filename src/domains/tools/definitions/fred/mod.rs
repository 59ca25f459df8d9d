//! FRED tools module.
//!
//! Tools backed by the FRED (Federal Reserve Economic Data) web API:
//! - `search`: Full text search over series metadata
//! - `series`: Observations of a single series
//!
//! Both tools share one [`FredClient`] and issue exactly one GET per call.

pub mod client;
pub mod common;
pub mod search;
pub mod series;

pub use client::{Endpoint, FredClient, FredQuery};
pub use search::{FredSearchParams, FredSearchTool};
pub use series::{FredSeriesParams, FredSeriesTool};
