//! Datasource catalogue queries.

use chrono::{NaiveDateTime, TimeDelta};
use duckdb::Connection;

use crate::DbError;

/// Returns the most recent `modified_date` in the catalogue as Unix seconds,
/// rounded to the nearest second. `None` when the catalogue is empty.
///
/// # Errors
///
/// Returns [`DbError`] if the query fails.
pub fn last_update(conn: &Connection) -> Result<Option<i64>, DbError> {
    let latest: Option<NaiveDateTime> =
        conn.query_row("SELECT MAX(modified_date) FROM datasource", [], |row| {
            row.get(0)
        })?;

    Ok(latest.map(round_to_second).map(|ts| ts.and_utc().timestamp()))
}

fn round_to_second(ts: NaiveDateTime) -> NaiveDateTime {
    if ts.and_utc().timestamp_subsec_millis() >= 500 {
        ts + TimeDelta::seconds(1)
    } else {
        ts
    }
}
