//! Table contract shared with the ingestion tooling.
//!
//! Production databases are populated externally; this schema is what the
//! read queries in this crate expect, and is created for local and test
//! databases.

use duckdb::Connection;

use crate::DbError;

/// Creates every table the read queries depend on, if missing.
///
/// # Errors
///
/// Returns [`DbError`] if any statement fails.
pub fn create_schema(conn: &Connection) -> Result<(), DbError> {
    conn.execute_batch(
        r#"CREATE TABLE IF NOT EXISTS osm (
            locode TEXT NOT NULL,
            geometry TEXT NOT NULL,
            bbox_north DOUBLE NOT NULL,
            bbox_south DOUBLE NOT NULL,
            bbox_east DOUBLE NOT NULL,
            bbox_west DOUBLE NOT NULL
        );

        CREATE TABLE IF NOT EXISTS asset (
            asset_id BIGINT,
            asset_name TEXT,
            locode TEXT NOT NULL,
            reference_number TEXT NOT NULL,
            start_time TIMESTAMP,
            end_time TIMESTAMP,
            gas TEXT NOT NULL,
            emissions_quantity DOUBLE,
            emissions_quantity_units TEXT,
            activity DOUBLE,
            activity_units TEXT,
            emissions_factor DOUBLE,
            emissions_factor_units TEXT,
            capacity DOUBLE,
            capacity_units TEXT,
            capacity_factor DOUBLE,
            lat DOUBLE,
            lon DOUBLE
        );

        CREATE TABLE IF NOT EXISTS "GridCellEmissionsEdgar" (
            cell_lat DOUBLE NOT NULL,
            cell_lon DOUBLE NOT NULL,
            gas TEXT NOT NULL,
            year INTEGER NOT NULL,
            reference_number TEXT NOT NULL,
            emissions_quantity DOUBLE
        );

        CREATE TABLE IF NOT EXISTS "CityCellOverlapEdgar" (
            locode TEXT NOT NULL,
            cell_lat DOUBLE NOT NULL,
            cell_lon DOUBLE NOT NULL,
            fraction_in_city DOUBLE NOT NULL
        );

        CREATE TABLE IF NOT EXISTS datasource (
            datasource_id TEXT PRIMARY KEY,
            publisher_id TEXT,
            name TEXT,
            gpc_reference_number TEXT,
            api_endpoint TEXT,
            created_date TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            modified_date TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        );"#,
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        create_schema(&conn).unwrap();
        create_schema(&conn).unwrap();

        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM information_schema.tables
                 WHERE table_name IN ('osm', 'asset', 'GridCellEmissionsEdgar',
                                      'CityCellOverlapEdgar', 'datasource')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 5);
    }
}
