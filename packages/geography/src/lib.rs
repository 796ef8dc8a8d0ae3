#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! City boundary resolution.
//!
//! Answers "which cities contain this point?" with a two-stage filter: a
//! bounding-box prefilter pushed down to storage, followed by an exact
//! containment test on each candidate's decoded geometry. Also serves the
//! stored boundary of a single city by locode.

pub mod boundary;
pub mod resolver;

pub use boundary::city_boundary;
pub use resolver::{BoundaryParser, BoundarySource, LocodeResolver, WktParser, resolve_locodes};

use global_api_spatial::SpatialError;
use thiserror::Error;

/// Errors that can occur during geography operations.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Storage operation failed.
    #[error("Database error: {0}")]
    Database(#[from] global_api_database::DbError),

    /// A stored boundary could not be decoded. The boundary data is corrupt.
    #[error("Corrupt boundary geometry for {locode}: {source}")]
    Geometry {
        /// Locode of the offending boundary row.
        locode: String,
        /// Decoding failure.
        source: SpatialError,
    },

    /// No boundary is stored for the locode.
    #[error("City boundary not found: {locode}")]
    NotFound {
        /// Locode that was looked up.
        locode: String,
    },

    /// Caller-supplied input was rejected before touching storage.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Description of what went wrong.
        message: String,
    },
}
