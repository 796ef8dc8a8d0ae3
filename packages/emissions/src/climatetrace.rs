//! Point-source (Climate TRACE asset) aggregation.
//!
//! Observations are grouped by gas. Each group sum skips missing and
//! non-finite quantities and is truncated to a whole number before any
//! GWP conversion.
//!
//! The combined `co2eq_100yr`/`co2eq_20yr` totals are taken from the
//! `co2e_100yr`/`co2e_20yr` pseudo-gas rows that the source publishes
//! alongside the real gases. They are not the sum of the per-gas
//! CO2-equivalents, unlike the grid-overlap totals in [`crate::edgar`].
//! The two behaviors are kept apart on purpose until the intended
//! semantics are confirmed.

use std::collections::BTreeMap;

use global_api_database::{Store, assets};
use global_api_database_models::AssetRow;
use global_api_emissions_models::{
    Activity, Capacity, EmissionPoint, EmissionTotals, EmissionsFactor, GPC_QUALITY_DATA,
    GPC_QUALITY_EMISSIONS_FACTOR, Gas, Horizon, Ownership, PointEmissions, PointSourceEmissions,
    Totals,
};

use crate::{EmissionsError, EmissionsQuery, format};

/// Pseudo-gas carrying the source's own 100-year CO2-equivalent.
pub const CO2E_100YR: &str = "co2e_100yr";

/// Pseudo-gas carrying the source's own 20-year CO2-equivalent.
pub const CO2E_20YR: &str = "co2e_20yr";

/// Aggregates point-source observations for a city, year, and sector.
///
/// A query that matches no rows yields all-zero totals and no points.
///
/// # Errors
///
/// Returns [`EmissionsError::Database`] if the observations cannot be
/// fetched.
pub fn aggregate_point_source(
    store: &Store,
    query: &EmissionsQuery,
) -> Result<PointSourceEmissions, EmissionsError> {
    let rows = {
        let session = store.session()?;
        assets::find_assets(&session, &query.locode, query.year, &query.reference_number)?
    };

    let emissions = summarize(&rows);
    log::debug!(
        "point-source {}/{}/{}: {} rows, {} points",
        query.locode,
        query.year,
        query.reference_number,
        rows.len(),
        emissions.points.len()
    );

    Ok(emissions)
}

/// Builds totals and point detail from already-fetched observations.
#[must_use]
pub fn summarize(rows: &[AssetRow]) -> PointSourceEmissions {
    PointSourceEmissions {
        totals: Totals {
            emissions: totals(&group_masses(rows)),
        },
        points: rows.iter().filter_map(point).collect(),
    }
}

/// Sums quantities per gas code and truncates each sum to a whole number.
///
/// A gas whose rows are all missing still appears, with mass `0`.
#[allow(clippy::cast_possible_truncation)]
fn group_masses(rows: &[AssetRow]) -> BTreeMap<&str, i64> {
    let mut sums: BTreeMap<&str, f64> = BTreeMap::new();
    for row in rows {
        let sum = sums.entry(row.gas.as_str()).or_insert(0.0);
        if let Some(quantity) = row.emissions_quantity.filter(|q| q.is_finite()) {
            *sum += quantity;
        }
    }

    sums.into_iter()
        .map(|(gas, sum)| (gas, sum.trunc() as i64))
        .collect()
}

fn totals(masses: &BTreeMap<&str, i64>) -> EmissionTotals {
    let mass = |code: &str| masses.get(code).copied().unwrap_or(0);
    let co2 = mass(Gas::Co2.as_ref());
    let ch4 = mass(Gas::Ch4.as_ref());
    let n2o = mass(Gas::N2o.as_ref());

    EmissionTotals {
        co2_mass: co2.to_string(),
        co2_co2eq: co2.to_string(),
        ch4_mass: ch4.to_string(),
        ch4_co2eq_100yr: format::scaled_integer(ch4, Gas::Ch4.gwp(Horizon::Years100)),
        ch4_co2eq_20yr: format::scaled_integer(ch4, Gas::Ch4.gwp(Horizon::Years20)),
        n2o_mass: n2o.to_string(),
        n2o_co2eq_100yr: format::scaled_integer(n2o, Gas::N2o.gwp(Horizon::Years100)),
        n2o_co2eq_20yr: format::scaled_integer(n2o, Gas::N2o.gwp(Horizon::Years20)),
        co2eq_100yr: mass(CO2E_100YR).to_string(),
        co2eq_20yr: mass(CO2E_20YR).to_string(),
        gpc_quality: GPC_QUALITY_DATA.to_string(),
    }
}

/// Point detail for a tracked gas with a recorded quantity. Zero is a
/// recorded quantity; `None` and NaN are not.
fn point(row: &AssetRow) -> Option<EmissionPoint> {
    let gas: Gas = row.gas.parse().ok()?;
    let quantity = row.emissions_quantity.filter(|q| !q.is_nan())?;

    Some(EmissionPoint {
        ownership: Ownership {
            asset_name: row.asset_name.clone(),
            asset_id: row.asset_id,
            lat: format::optional(row.lat),
            lon: format::optional(row.lon),
        },
        capacity: Capacity {
            value: format::optional(row.capacity),
            units: row.capacity_units.clone(),
            factor: row
                .capacity_factor
                .map_or_else(|| format::NOT_AVAILABLE.to_string(), format::float),
        },
        activity: Activity {
            value: format::optional(row.activity),
            units: row.activity_units.clone(),
            gpc_quality: GPC_QUALITY_DATA.to_string(),
        },
        emissions_factor: EmissionsFactor {
            gas,
            value: format::optional(row.emissions_factor),
            units: row.emissions_factor_units.clone(),
            gpc_quality: GPC_QUALITY_EMISSIONS_FACTOR.to_string(),
        },
        emissions: PointEmissions {
            gas,
            value: format::float(quantity),
            units: row.emissions_quantity_units.clone(),
            co2eq_100yr: format::float(quantity * gas.gwp(Horizon::Years100)),
            co2eq_20yr: format::float(quantity * gas.gwp(Horizon::Years20)),
            gpc_quality: GPC_QUALITY_DATA.to_string(),
        },
    })
}
