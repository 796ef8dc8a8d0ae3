//! Grid-overlap (EDGAR) aggregation.
//!
//! Each grid cell's emissions are weighted by the fraction of the cell that
//! lies inside the city and summed per gas. Masses stay fractional.
//!
//! The combined `co2eq_100yr`/`co2eq_20yr` totals are the CO2 mass plus the
//! CH4 and N2O CO2-equivalents, each rounded half-to-even to a whole number
//! first. This rounding differs from the point-source totals in
//! [`crate::climatetrace`] and is reproduced exactly for numeric parity.

use std::collections::BTreeMap;

use strum::IntoEnumIterator as _;

use global_api_database::{Store, edgar};
use global_api_database_models::GasTotal;
use global_api_emissions_models::{
    EmissionTotals, GPC_QUALITY_DATA, Gas, GridOverlapEmissions, Horizon, Totals,
};

use crate::{EmissionsError, EmissionsQuery, format};

/// Aggregates overlap-weighted grid emissions for a city, year, and sector.
///
/// # Errors
///
/// * [`EmissionsError::NotFound`] if no grid cell overlapping the city has
///   data for the year and sector
/// * [`EmissionsError::DataIntegrity`] if CO2, CH4 or N2O has cells but no
///   quantities to sum
/// * [`EmissionsError::Database`] if the query fails
pub fn aggregate_grid_overlap(
    store: &Store,
    query: &EmissionsQuery,
) -> Result<GridOverlapEmissions, EmissionsError> {
    let totals = {
        let session = store.session()?;
        edgar::sum_weighted_emissions(&session, &query.locode, query.year, &query.reference_number)?
    };

    log::debug!(
        "grid-overlap {}/{}/{}: {} gases",
        query.locode,
        query.year,
        query.reference_number,
        totals.len()
    );

    summarize(&totals)?.ok_or_else(|| query.not_found())
}

/// Builds totals from per-gas weighted sums. `Ok(None)` when there are no
/// sums at all, which is distinct from sums that happen to be zero.
///
/// Gases other than CO2, CH4 and N2O are never read, so a missing sum for
/// one of them is ignored.
///
/// # Errors
///
/// Returns [`EmissionsError::DataIntegrity`] if a tracked gas has no sum.
#[allow(clippy::cast_precision_loss)]
pub fn summarize(totals: &[GasTotal]) -> Result<Option<GridOverlapEmissions>, EmissionsError> {
    if totals.is_empty() {
        return Ok(None);
    }

    let mut masses: BTreeMap<&str, f64> = BTreeMap::new();
    for total in totals {
        match total.total {
            Some(value) => {
                masses.insert(total.gas.as_str(), value);
            }
            None if Gas::iter().any(|gas| gas.edgar_code() == total.gas) => {
                return Err(EmissionsError::DataIntegrity {
                    message: format!("no emissions quantities to sum for {}", total.gas),
                });
            }
            None => log::debug!("skipping {} with no quantities to sum", total.gas),
        }
    }
    let mass = |gas: Gas| masses.get(gas.edgar_code()).copied();

    let co2 = mass(Gas::Co2);
    let ch4 = mass(Gas::Ch4).unwrap_or(0.0);
    let n2o = mass(Gas::N2o).unwrap_or(0.0);

    let co2eq = |horizon: Horizon| {
        let others = rounded(ch4 * Gas::Ch4.gwp(horizon)) + rounded(n2o * Gas::N2o.gwp(horizon));
        // A missing CO2 mass contributes an exact integer zero.
        co2.map_or_else(
            || others.to_string(),
            |co2| format::float(co2 + others as f64),
        )
    };

    let co2 = co2.unwrap_or(0.0);

    Ok(Some(GridOverlapEmissions {
        totals: Totals {
            emissions: EmissionTotals {
                co2_mass: format::float(co2),
                co2_co2eq: format::float(co2),
                ch4_mass: format::float(ch4),
                ch4_co2eq_100yr: format::float(ch4 * Gas::Ch4.gwp(Horizon::Years100)),
                ch4_co2eq_20yr: format::float(ch4 * Gas::Ch4.gwp(Horizon::Years20)),
                n2o_mass: format::float(n2o),
                n2o_co2eq_100yr: format::float(n2o * Gas::N2o.gwp(Horizon::Years100)),
                n2o_co2eq_20yr: format::float(n2o * Gas::N2o.gwp(Horizon::Years20)),
                co2eq_100yr: co2eq(Horizon::Years100),
                co2eq_20yr: co2eq(Horizon::Years20),
                gpc_quality: GPC_QUALITY_DATA.to_string(),
            },
        },
    }))
}

#[allow(clippy::cast_possible_truncation)]
fn rounded(value: f64) -> i64 {
    value.round_ties_even() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total(gas: &str, total: f64) -> GasTotal {
        GasTotal {
            gas: gas.to_string(),
            total: Some(total),
        }
    }

    #[test]
    fn no_rows_is_none() {
        assert!(summarize(&[]).unwrap().is_none());
    }

    #[test]
    fn methane_only() {
        let totals = summarize(&[total("CH4", 10.0)]).unwrap().unwrap().totals.emissions;

        assert_eq!(totals.co2_mass, "0.0");
        assert_eq!(totals.co2_co2eq, "0.0");
        assert_eq!(totals.n2o_mass, "0.0");
        assert_eq!(totals.n2o_co2eq_100yr, "0.0");
        assert_eq!(totals.ch4_mass, "10.0");
        assert_eq!(totals.ch4_co2eq_100yr, "298.0");
        assert_eq!(totals.ch4_co2eq_20yr, "825.0");
        assert_eq!(totals.co2eq_100yr, "298");
        assert_eq!(totals.co2eq_20yr, "825");
        assert_eq!(totals.gpc_quality, "TBD");
    }

    #[test]
    fn combined_total_adds_rounded_equivalents_to_co2() {
        let totals = summarize(&[
            total("CO2", 100.5),
            total("CH4", 1.0),
            total("N2O", 0.01),
        ])
        .unwrap()
        .unwrap()
        .totals
        .emissions;

        // 29.8 -> 30 and 2.73 -> 3
        assert_eq!(totals.co2eq_100yr, "133.5");
        // 82.5 -> 82 (half to even) and 2.73 -> 3
        assert_eq!(totals.co2eq_20yr, "185.5");
        assert_eq!(totals.n2o_co2eq_100yr, "2.73");
    }

    #[test]
    fn zero_weighted_sum_is_still_data() {
        let totals = summarize(&[total("CO2", 0.0)]).unwrap().unwrap().totals.emissions;

        assert_eq!(totals.co2_mass, "0.0");
        assert_eq!(totals.co2eq_100yr, "0.0");
    }

    #[test]
    fn untracked_gases_only_yield_zero_totals() {
        let totals = summarize(&[total("SF6", 3.0)]).unwrap().unwrap().totals.emissions;

        assert_eq!(totals.ch4_mass, "0.0");
        assert_eq!(totals.co2eq_100yr, "0");
    }

    #[test]
    fn untracked_gas_without_sum_is_skipped() {
        let sf6 = GasTotal {
            gas: "SF6".to_string(),
            total: None,
        };
        let totals = summarize(&[total("CH4", 10.0), sf6])
            .unwrap()
            .unwrap()
            .totals
            .emissions;

        assert_eq!(totals.ch4_mass, "10.0");
        assert_eq!(totals.co2eq_100yr, "298");
    }

    #[test]
    fn tracked_gas_without_sum_is_corrupt() {
        let ch4 = GasTotal {
            gas: "CH4".to_string(),
            total: None,
        };

        assert!(matches!(
            summarize(&[total("CO2", 1.0), ch4]),
            Err(EmissionsError::DataIntegrity { .. })
        ));
    }

    #[test]
    fn half_to_even_rounding() {
        assert_eq!(rounded(82.5), 82);
        assert_eq!(rounded(83.5), 84);
        assert_eq!(rounded(29.8), 30);
    }
}
