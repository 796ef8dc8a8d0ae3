#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API response and error types for the Global API server.
//!
//! These types are serialized to JSON for the REST API. Field names are
//! `snake_case` to match the `/api/v0` contract existing clients consume.
//! Emissions bodies are served directly from `global_api_emissions_models`.

use global_api_database_models::CityBoundaryRow;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// Locodes of the cities containing a point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiLocodes {
    /// Matching locodes in ascending order; may be empty.
    pub locodes: Vec<String>,
}

/// A city boundary as WKT plus its bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiCityBoundary {
    /// Polygon or multipolygon WKT.
    pub city_geometry: String,
    pub bbox_north: f64,
    pub bbox_south: f64,
    pub bbox_east: f64,
    pub bbox_west: f64,
}

impl From<CityBoundaryRow> for ApiCityBoundary {
    fn from(row: CityBoundaryRow) -> Self {
        Self {
            city_geometry: row.geometry,
            bbox_north: row.bbox.north,
            bbox_south: row.bbox.south,
            bbox_east: row.bbox.east,
            bbox_west: row.bbox.west,
        }
    }
}

/// Most recent catalogue modification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiLastUpdate {
    /// Unix timestamp in seconds.
    pub last_update: i64,
}

/// Category of a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ApiErrorKind {
    /// The query was well formed but nothing matched.
    NotFound,
    /// The request was rejected before any data was read.
    InvalidInput,
    /// Stored data is corrupt.
    DataIntegrity,
    /// The storage layer failed.
    Storage,
}

/// Error body returned with every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Human-readable message.
    pub detail: String,
    /// Machine-readable category.
    pub kind: ApiErrorKind,
}

#[cfg(test)]
mod tests {
    use global_api_database_models::BoundingBox;

    use super::*;

    #[test]
    fn boundary_flattens_bbox() {
        let api = ApiCityBoundary::from(CityBoundaryRow {
            locode: "US NYC".to_string(),
            geometry: "POLYGON ((0 0, 1 0, 1 1, 0 0))".to_string(),
            bbox: BoundingBox::new(1.0, 0.0, 1.0, 0.0),
        });

        assert_eq!(api.bbox_north, 1.0);
        assert_eq!(api.bbox_west, 0.0);
        assert_eq!(api.city_geometry, "POLYGON ((0 0, 1 0, 1 1, 0 0))");
    }

    #[test]
    fn error_kind_wire_names() {
        let body = ApiErrorBody {
            detail: "No data available".to_string(),
            kind: ApiErrorKind::NotFound,
        };

        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"detail":"No data available","kind":"not_found"}"#
        );
        assert_eq!(ApiErrorKind::DataIntegrity.to_string(), "data_integrity");
    }
}
