#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Storage row types.
//!
//! These types represent the shapes of data as stored in and retrieved from
//! the Global API `DuckDB` database. They are distinct from the response
//! types in `global_api_emissions_models` and `global_api_server_models`.
//! Numeric observation columns are `Option<f64>` so that an absent value
//! stays distinguishable from zero.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box in WGS84 coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Northern latitude boundary.
    pub north: f64,
    /// Southern latitude boundary.
    pub south: f64,
    /// Eastern longitude boundary.
    pub east: f64,
    /// Western longitude boundary.
    pub west: f64,
}

impl BoundingBox {
    /// Creates a new bounding box from the given edges.
    #[must_use]
    pub const fn new(north: f64, south: f64, east: f64, west: f64) -> Self {
        Self {
            north,
            south,
            east,
            west,
        }
    }

    /// Whether the point lies inside the box, edges included.
    #[must_use]
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        self.south <= lat && lat <= self.north && self.west <= lon && lon <= self.east
    }
}

/// A city boundary row from the `osm` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityBoundaryRow {
    /// UN/LOCODE of the city (e.g. "US NYC").
    pub locode: String,
    /// Polygon or multipolygon encoded as WKT.
    pub geometry: String,
    /// Precomputed envelope of `geometry`.
    pub bbox: BoundingBox,
}

/// A point-source observation row from the `asset` table.
///
/// One row per asset, time window and gas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRow {
    /// Source asset identifier.
    pub asset_id: Option<i64>,
    /// Human-readable asset name.
    pub asset_name: Option<String>,
    /// Locode the asset is attributed to.
    pub locode: String,
    /// GPC sector/sub-sector reference number (e.g. "II.1.1").
    pub reference_number: String,
    /// End of the observation window.
    pub end_time: Option<NaiveDateTime>,
    /// Gas code in lower case (`co2`, `ch4`, `n2o`, `co2e_100yr`, ...).
    pub gas: String,
    pub emissions_quantity: Option<f64>,
    pub emissions_quantity_units: Option<String>,
    pub activity: Option<f64>,
    pub activity_units: Option<String>,
    pub emissions_factor: Option<f64>,
    pub emissions_factor_units: Option<String>,
    pub capacity: Option<f64>,
    pub capacity_units: Option<String>,
    pub capacity_factor: Option<f64>,
    /// Asset latitude.
    pub lat: Option<f64>,
    /// Asset longitude.
    pub lon: Option<f64>,
}

/// Overlap-weighted emissions summed for a single gas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasTotal {
    /// Gas code as stored in the grid table (`CO2`, `CH4`, `N2O`, ...).
    pub gas: String,
    /// Sum of `emissions_quantity * fraction_in_city` for this gas. `None`
    /// when every joined quantity for the gas is NULL.
    pub total: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bbox_contains_interior_point() {
        let bbox = BoundingBox::new(41.0, 40.0, -73.0, -74.0);
        assert!(bbox.contains(40.5, -73.5));
    }

    #[test]
    fn bbox_contains_edges() {
        let bbox = BoundingBox::new(41.0, 40.0, -73.0, -74.0);
        assert!(bbox.contains(41.0, -74.0));
        assert!(bbox.contains(40.0, -73.0));
    }

    #[test]
    fn bbox_rejects_outside_point() {
        let bbox = BoundingBox::new(41.0, 40.0, -73.0, -74.0);
        assert!(!bbox.contains(42.0, -73.5));
        assert!(!bbox.contains(40.5, -72.0));
        assert!(!bbox.contains(f64::NAN, -73.5));
    }
}
