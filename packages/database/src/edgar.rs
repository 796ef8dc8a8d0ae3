//! EDGAR grid-cell queries.
//!
//! Grid cells carry emissions per gas, year, and sector; a separate overlap
//! table records what fraction of each cell falls inside each city.

use duckdb::{Connection, params};
use global_api_database_models::GasTotal;

use crate::DbError;

/// Sums overlap-weighted grid emissions per gas for a city.
///
/// Each joined row contributes `emissions_quantity * fraction_in_city`.
/// An empty result means no cell overlapping the city has data for the
/// requested year and sector. A gas whose joined quantities are all NULL is
/// still returned, with no total.
///
/// # Errors
///
/// Returns [`DbError`] if the query fails.
pub fn sum_weighted_emissions(
    conn: &Connection,
    locode: &str,
    year: i32,
    reference_number: &str,
) -> Result<Vec<GasTotal>, DbError> {
    let mut stmt = conn.prepare(
        r#"SELECT gce.gas,
                  SUM(gce.emissions_quantity * cco.fraction_in_city) AS total_emissions
           FROM "CityCellOverlapEdgar" cco
           JOIN "GridCellEmissionsEdgar" gce
             ON cco.cell_lat = gce.cell_lat AND cco.cell_lon = gce.cell_lon
           WHERE cco.locode = ?
             AND gce.reference_number = ?
             AND gce.year = ?
           GROUP BY gce.gas
           ORDER BY gce.gas"#,
    )?;
    let mut rows = stmt.query(params![locode, reference_number, year])?;

    let mut totals = Vec::new();
    while let Some(row) = rows.next()? {
        totals.push(GasTotal {
            gas: row.get(0)?,
            total: row.get(1)?,
        });
    }

    Ok(totals)
}
