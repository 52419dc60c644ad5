//! Structured elevation record: bounds plus heights in lattice order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use terracut_core::types::{GeoRectangle, SampledPoint};
use terracut_core::Result;

/// JSON document `{lonMin, latMin, lonMax, latMax, heights, timestamp}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElevationRecord {
    pub lon_min: f64,
    pub lat_min: f64,
    pub lon_max: f64,
    pub lat_max: f64,
    /// Row-major heights; `null` where terrain was unresolved.
    pub heights: Vec<Option<f64>>,
    pub timestamp: DateTime<Utc>,
}

impl ElevationRecord {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Build a record; the caller supplies the generation time.
pub fn build_record(
    rectangle: &GeoRectangle,
    points: &[SampledPoint],
    timestamp: DateTime<Utc>,
) -> ElevationRecord {
    ElevationRecord {
        lon_min: rectangle.west(),
        lat_min: rectangle.south(),
        lon_max: rectangle.east(),
        lat_max: rectangle.north(),
        heights: points.iter().map(|p| p.height).collect(),
        timestamp,
    }
}
