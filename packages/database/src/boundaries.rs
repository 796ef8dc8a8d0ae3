//! City boundary queries over the `osm` table.

use duckdb::{Connection, Row, params};
use global_api_database_models::{BoundingBox, CityBoundaryRow};

use crate::DbError;

const BOUNDARY_COLUMNS: &str = "locode, geometry, bbox_north, bbox_south, bbox_east, bbox_west";

/// Returns every boundary whose bounding box contains the point, edges
/// included.
///
/// This is only the prefilter: the geometry itself is not consulted, so a
/// returned row may still not contain the point.
///
/// # Errors
///
/// Returns [`DbError`] if the query fails.
pub fn find_bbox_candidates(
    conn: &Connection,
    lat: f64,
    lon: f64,
) -> Result<Vec<CityBoundaryRow>, DbError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {BOUNDARY_COLUMNS} FROM osm
         WHERE bbox_north >= ? AND bbox_south <= ?
           AND bbox_east >= ? AND bbox_west <= ?"
    ))?;
    let mut rows = stmt.query(params![lat, lat, lon, lon])?;

    let mut candidates = Vec::new();
    while let Some(row) = rows.next()? {
        candidates.push(boundary_from_row(row)?);
    }

    Ok(candidates)
}

/// Returns the first boundary stored for `locode`, if any.
///
/// # Errors
///
/// Returns [`DbError`] if the query fails.
pub fn find_by_locode(conn: &Connection, locode: &str) -> Result<Option<CityBoundaryRow>, DbError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {BOUNDARY_COLUMNS} FROM osm WHERE locode = ? LIMIT 1"
    ))?;
    let mut rows = stmt.query(params![locode])?;

    rows.next()?.map(boundary_from_row).transpose()
}

fn boundary_from_row(row: &Row<'_>) -> Result<CityBoundaryRow, DbError> {
    Ok(CityBoundaryRow {
        locode: row.get(0)?,
        geometry: row.get(1)?,
        bbox: BoundingBox::new(row.get(2)?, row.get(3)?, row.get(4)?, row.get(5)?),
    })
}
