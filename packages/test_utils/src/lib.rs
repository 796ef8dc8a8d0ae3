#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(
    clippy::multiple_crate_versions,
    clippy::cargo_common_metadata,
    clippy::missing_panics_doc
)]

//! Test fixtures for the Global API workspace.
//!
//! Every helper panics on failure: these are only used from tests, where a
//! broken fixture should stop the test immediately.

use duckdb::params;
use global_api_database::Store;
use global_api_database_models::AssetRow;

/// A fresh in-memory store with the schema in place.
#[must_use]
pub fn empty_store() -> Store {
    Store::open_in_memory().expect("open in-memory store")
}

/// WKT for an axis-aligned rectangle.
#[must_use]
pub fn rect_wkt(west: f64, south: f64, east: f64, north: f64) -> String {
    format!(
        "POLYGON (({west} {south}, {east} {south}, {east} {north}, {west} {north}, {west} {south}))"
    )
}

/// Stores a boundary row verbatim.
pub fn insert_boundary(
    store: &Store,
    locode: &str,
    geometry: &str,
    north: f64,
    south: f64,
    east: f64,
    west: f64,
) {
    let session = store.session().expect("session");
    session
        .execute(
            "INSERT INTO osm (locode, geometry, bbox_north, bbox_south, bbox_east, bbox_west)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![locode, geometry, north, south, east, west],
        )
        .expect("insert boundary");
}

/// Stores a rectangular boundary whose bbox is the rectangle itself.
pub fn insert_rect_boundary(
    store: &Store,
    locode: &str,
    west: f64,
    south: f64,
    east: f64,
    north: f64,
) {
    insert_boundary(
        store,
        locode,
        &rect_wkt(west, south, east, north),
        north,
        south,
        east,
        west,
    );
}

/// A point-source row with every optional column empty.
///
/// The row belongs to asset 1 in `US NYC`, sector `II.1.1`, and its window
/// ends on 2022-12-31.
#[must_use]
pub fn asset(gas: &str, emissions_quantity: Option<f64>) -> AssetRow {
    AssetRow {
        asset_id: Some(1),
        asset_name: Some("Test Asset".to_string()),
        locode: "US NYC".to_string(),
        reference_number: "II.1.1".to_string(),
        end_time: None,
        gas: gas.to_string(),
        emissions_quantity,
        emissions_quantity_units: Some("tonnes".to_string()),
        activity: None,
        activity_units: None,
        emissions_factor: None,
        emissions_factor_units: None,
        capacity: None,
        capacity_units: None,
        capacity_factor: None,
        lat: None,
        lon: None,
    }
}

/// Stores an asset row. `end_time` is a `DuckDB` timestamp literal such as
/// `"2022-12-31 00:00:00"` and overrides `row.end_time`.
pub fn insert_asset(store: &Store, row: &AssetRow, end_time: &str) {
    let session = store.session().expect("session");
    session
        .execute(
            "INSERT INTO asset (asset_id, asset_name, locode, reference_number, end_time, gas,
                                emissions_quantity, emissions_quantity_units,
                                activity, activity_units,
                                emissions_factor, emissions_factor_units,
                                capacity, capacity_units, capacity_factor,
                                lat, lon)
             VALUES (?, ?, ?, ?, CAST(? AS TIMESTAMP), ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                row.asset_id,
                row.asset_name,
                row.locode,
                row.reference_number,
                end_time,
                row.gas,
                row.emissions_quantity,
                row.emissions_quantity_units,
                row.activity,
                row.activity_units,
                row.emissions_factor,
                row.emissions_factor_units,
                row.capacity,
                row.capacity_units,
                row.capacity_factor,
                row.lat,
                row.lon,
            ],
        )
        .expect("insert asset");
}

/// Stores one EDGAR grid-cell observation.
pub fn insert_grid_cell(
    store: &Store,
    cell: (f64, f64),
    gas: &str,
    year: i32,
    reference_number: &str,
    emissions_quantity: f64,
) {
    let session = store.session().expect("session");
    session
        .execute(
            r#"INSERT INTO "GridCellEmissionsEdgar"
                   (cell_lat, cell_lon, gas, year, reference_number, emissions_quantity)
               VALUES (?, ?, ?, ?, ?, ?)"#,
            params![cell.0, cell.1, gas, year, reference_number, emissions_quantity],
        )
        .expect("insert grid cell");
}

/// Stores the fraction of a grid cell that falls inside a city.
pub fn insert_overlap(store: &Store, locode: &str, cell: (f64, f64), fraction_in_city: f64) {
    let session = store.session().expect("session");
    session
        .execute(
            r#"INSERT INTO "CityCellOverlapEdgar" (locode, cell_lat, cell_lon, fraction_in_city)
               VALUES (?, ?, ?, ?)"#,
            params![locode, cell.0, cell.1, fraction_in_city],
        )
        .expect("insert overlap");
}

/// Stores a catalogue entry. `modified_date` is a `DuckDB` timestamp literal.
pub fn insert_datasource(store: &Store, datasource_id: &str, name: &str, modified_date: &str) {
    let session = store.session().expect("session");
    session
        .execute(
            "INSERT INTO datasource (datasource_id, name, modified_date)
             VALUES (?, ?, CAST(? AS TIMESTAMP))",
            params![datasource_id, name, modified_date],
        )
        .expect("insert datasource");
}
