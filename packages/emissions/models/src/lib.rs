#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Gas definitions, global warming potentials, and the normalized emissions
//! response shapes.
//!
//! Every figure in a response is a string. Masses, CO2-equivalents, and
//! point-level values keep the exact textual form produced by the
//! aggregators so that clients see the same digits regardless of transport.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Placeholder GPC data-quality marker for activity and emissions data.
pub const GPC_QUALITY_DATA: &str = "TBD";

/// Placeholder GPC data-quality marker for emissions factors.
pub const GPC_QUALITY_EMISSIONS_FACTOR: &str = "TBD";

/// Greenhouse gases tracked in every totals object.
///
/// The string form is the lower-case code used by point-source data
/// (`co2`, `ch4`, `n2o`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Gas {
    /// Carbon dioxide
    Co2,
    /// Methane
    Ch4,
    /// Nitrous oxide
    N2o,
}

impl Gas {
    /// Returns the upper-case code used by EDGAR grid data.
    #[must_use]
    pub const fn edgar_code(self) -> &'static str {
        match self {
            Self::Co2 => "CO2",
            Self::Ch4 => "CH4",
            Self::N2o => "N2O",
        }
    }

    /// Returns the global warming potential of this gas (IPCC AR6).
    #[must_use]
    pub const fn gwp(self, horizon: Horizon) -> f64 {
        match (self, horizon) {
            (Self::Co2, _) => 1.0,
            (Self::Ch4, Horizon::Years100) => 29.8,
            (Self::Ch4, Horizon::Years20) => 82.5,
            (Self::N2o, _) => 273.0,
        }
    }
}

/// Time horizon for a global warming potential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Horizon {
    /// 100-year horizon
    #[strum(serialize = "100yr")]
    Years100,
    /// 20-year horizon
    #[strum(serialize = "20yr")]
    Years20,
}

/// Normalized per-gas totals for a city, year, and sector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmissionTotals {
    pub co2_mass: String,
    pub co2_co2eq: String,
    pub ch4_mass: String,
    pub ch4_co2eq_100yr: String,
    pub ch4_co2eq_20yr: String,
    pub n2o_mass: String,
    pub n2o_co2eq_100yr: String,
    pub n2o_co2eq_20yr: String,
    /// Combined CO2-equivalent over 100 years.
    pub co2eq_100yr: String,
    /// Combined CO2-equivalent over 20 years.
    pub co2eq_20yr: String,
    pub gpc_quality: String,
}

/// Wrapper matching the `{"totals": {"emissions": {...}}}` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub emissions: EmissionTotals,
}

/// Point-source aggregation result: totals plus one record per observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointSourceEmissions {
    pub totals: Totals,
    pub points: Vec<EmissionPoint>,
}

/// Grid-overlap aggregation result. Grid data has no point-level detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridOverlapEmissions {
    pub totals: Totals,
}

/// Detail for a single point-source observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmissionPoint {
    pub ownership: Ownership,
    pub capacity: Capacity,
    pub activity: Activity,
    pub emissions_factor: EmissionsFactor,
    pub emissions: PointEmissions,
}

/// Who owns the asset and where it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ownership {
    pub asset_name: Option<String>,
    pub asset_id: Option<i64>,
    pub lat: String,
    pub lon: String,
}

/// Installed capacity of the asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capacity {
    pub value: String,
    pub units: Option<String>,
    /// Capacity factor, or `"NA"` when unknown.
    pub factor: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub value: String,
    pub units: Option<String>,
    pub gpc_quality: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmissionsFactor {
    pub gas: Gas,
    pub value: String,
    pub units: Option<String>,
    pub gpc_quality: String,
}

/// Emitted quantity with its CO2-equivalents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointEmissions {
    pub gas: Gas,
    pub value: String,
    pub units: Option<String>,
    pub co2eq_100yr: String,
    pub co2eq_20yr: String,
    pub gpc_quality: String,
}
