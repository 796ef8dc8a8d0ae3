//! Point-source observation queries over the `asset` table.

use duckdb::{Connection, Row, params};
use global_api_database_models::AssetRow;

use crate::DbError;

/// Returns all observations for a locode, reporting year, and GPC reference
/// number.
///
/// The reporting year is the calendar year of `end_time`. Rows are ordered
/// by asset, window end, and gas so that repeated calls return the same
/// sequence.
///
/// # Errors
///
/// Returns [`DbError`] if the query fails or a column has an unexpected type.
pub fn find_assets(
    conn: &Connection,
    locode: &str,
    year: i32,
    reference_number: &str,
) -> Result<Vec<AssetRow>, DbError> {
    let mut stmt = conn.prepare(
        "SELECT asset_id, asset_name, locode, reference_number, end_time, gas,
                emissions_quantity, emissions_quantity_units,
                activity, activity_units,
                emissions_factor, emissions_factor_units,
                capacity, capacity_units, capacity_factor,
                lat, lon
         FROM asset
         WHERE reference_number = ?
           AND locode = ?
           AND EXTRACT(YEAR FROM end_time) = ?
         ORDER BY asset_id, end_time, gas",
    )?;
    let mut rows = stmt.query(params![reference_number, locode, year])?;

    let mut assets = Vec::new();
    while let Some(row) = rows.next()? {
        assets.push(asset_from_row(row)?);
    }

    log::debug!(
        "fetched {} asset rows for {locode}/{year}/{reference_number}",
        assets.len()
    );

    Ok(assets)
}

fn asset_from_row(row: &Row<'_>) -> Result<AssetRow, DbError> {
    Ok(AssetRow {
        asset_id: row.get(0)?,
        asset_name: row.get(1)?,
        locode: row.get(2)?,
        reference_number: row.get(3)?,
        end_time: row.get(4)?,
        gas: row.get(5)?,
        emissions_quantity: row.get(6)?,
        emissions_quantity_units: row.get(7)?,
        activity: row.get(8)?,
        activity_units: row.get(9)?,
        emissions_factor: row.get(10)?,
        emissions_factor_units: row.get(11)?,
        capacity: row.get(12)?,
        capacity_units: row.get(13)?,
        capacity_factor: row.get(14)?,
        lat: row.get(15)?,
        lon: row.get(16)?,
    })
}
