#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Emissions aggregation for a city, reporting year, and GPC sector.
//!
//! Two source schemas are supported:
//!
//! * [`climatetrace`]: point-source observations, one row per asset, window,
//!   and gas. Produces totals and per-point detail.
//! * [`edgar`]: gridded emissions weighted by the fraction of each cell
//!   inside the city. Produces totals only.
//!
//! Both convert masses to CO2-equivalents with the fixed GWP table in
//! [`global_api_emissions_models::Gas::gwp`], but they combine the per-gas
//! figures differently. See each module.

pub mod climatetrace;
pub mod edgar;
pub mod format;

pub use climatetrace::aggregate_point_source;
pub use edgar::aggregate_grid_overlap;

use thiserror::Error;

/// Errors that can occur during emissions aggregation.
#[derive(Debug, Error)]
pub enum EmissionsError {
    /// Storage operation failed.
    #[error("Database error: {0}")]
    Database(#[from] global_api_database::DbError),

    /// No source rows match the query.
    #[error("No data available for {locode}/{year}/{reference_number}")]
    NotFound {
        /// Requested locode.
        locode: String,
        /// Requested year.
        year: i32,
        /// Requested GPC reference number.
        reference_number: String,
    },

    /// Stored observations cannot be aggregated.
    #[error("Corrupt emissions data: {message}")]
    DataIntegrity {
        /// Description of what went wrong.
        message: String,
    },

    /// Caller-supplied input was rejected before touching storage.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Description of what went wrong.
        message: String,
    },
}

/// A validated aggregation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmissionsQuery {
    /// City locode, matched exactly.
    pub locode: String,
    /// Reporting year.
    pub year: i32,
    /// GPC sector/sub-sector reference number, matched exactly.
    pub reference_number: String,
}

impl EmissionsQuery {
    /// Builds a query, rejecting blank identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`EmissionsError::InvalidInput`] if `locode` or
    /// `reference_number` is blank.
    pub fn new(
        locode: impl Into<String>,
        year: i32,
        reference_number: impl Into<String>,
    ) -> Result<Self, EmissionsError> {
        let locode = locode.into();
        let reference_number = reference_number.into();

        if locode.trim().is_empty() {
            return Err(EmissionsError::InvalidInput {
                message: "locode must not be blank".to_string(),
            });
        }
        if reference_number.trim().is_empty() {
            return Err(EmissionsError::InvalidInput {
                message: "reference number must not be blank".to_string(),
            });
        }

        Ok(Self {
            locode,
            year,
            reference_number,
        })
    }

    /// Builds a query from raw path segments, parsing the year.
    ///
    /// # Errors
    ///
    /// Returns [`EmissionsError::InvalidInput`] if the year is not an
    /// integer or an identifier is blank.
    pub fn parse(locode: &str, year: &str, reference_number: &str) -> Result<Self, EmissionsError> {
        let year = year
            .trim()
            .parse::<i32>()
            .map_err(|e| EmissionsError::InvalidInput {
                message: format!("year must be an integer, got {year:?}: {e}"),
            })?;

        Self::new(locode, year, reference_number)
    }

    fn not_found(&self) -> EmissionsError {
        EmissionsError::NotFound {
            locode: self.locode.clone(),
            year: self.year,
            reference_number: self.reference_number.clone(),
        }
    }
}
