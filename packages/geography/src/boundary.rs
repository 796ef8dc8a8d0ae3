//! Single-city boundary lookup.

use global_api_database::{Store, boundaries};
use global_api_database_models::CityBoundaryRow;

use crate::GeoError;

/// Returns the stored boundary for `locode`.
///
/// When several rows share the locode, the first one stored wins.
///
/// # Errors
///
/// * [`GeoError::InvalidInput`] if `locode` is blank
/// * [`GeoError::NotFound`] if no boundary is stored for it
/// * [`GeoError::Database`] if the query fails
pub fn city_boundary(store: &Store, locode: &str) -> Result<CityBoundaryRow, GeoError> {
    if locode.trim().is_empty() {
        return Err(GeoError::InvalidInput {
            message: "locode must not be blank".to_string(),
        });
    }

    let session = store.session()?;
    boundaries::find_by_locode(&session, locode)?.ok_or_else(|| GeoError::NotFound {
        locode: locode.to_string(),
    })
}
