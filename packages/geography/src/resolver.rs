//! Point-to-locode resolution.
//!
//! Candidate boundaries come from a [`BoundarySource`] that only applies the
//! cheap bounding-box test. Each candidate's geometry is then decoded by a
//! [`BoundaryParser`] and checked with [`Region::covers`]. Boundaries may
//! overlap, so a point can resolve to several locodes.

use std::collections::BTreeSet;
use std::sync::Arc;

use geo::MultiPolygon;
use global_api_database::{Store, boundaries};
use global_api_database_models::CityBoundaryRow;
use global_api_spatial::{Region, SpatialError, parse_wkt_boundary};

use crate::GeoError;

/// Supplies boundaries whose bounding box contains a point.
pub trait BoundarySource {
    /// Returns every boundary whose bbox contains (`lat`, `lon`), edges
    /// included.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError`] if the candidates cannot be fetched.
    fn candidates_at(&self, lat: f64, lon: f64) -> Result<Vec<CityBoundaryRow>, GeoError>;
}

impl BoundarySource for Store {
    fn candidates_at(&self, lat: f64, lon: f64) -> Result<Vec<CityBoundaryRow>, GeoError> {
        let session = self.session()?;
        Ok(boundaries::find_bbox_candidates(&session, lat, lon)?)
    }
}

impl<T: BoundarySource + ?Sized> BoundarySource for &T {
    fn candidates_at(&self, lat: f64, lon: f64) -> Result<Vec<CityBoundaryRow>, GeoError> {
        (**self).candidates_at(lat, lon)
    }
}

impl<T: BoundarySource + ?Sized> BoundarySource for Arc<T> {
    fn candidates_at(&self, lat: f64, lon: f64) -> Result<Vec<CityBoundaryRow>, GeoError> {
        (**self).candidates_at(lat, lon)
    }
}

/// Decodes stored boundary text into something that answers containment.
pub trait BoundaryParser {
    /// Decoded region type.
    type Region: Region;

    /// Decodes a stored geometry.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError`] if the text is not a valid areal geometry.
    fn parse(&self, geometry: &str) -> Result<Self::Region, SpatialError>;
}

/// Parses WKT polygons and multipolygons.
#[derive(Debug, Clone, Copy, Default)]
pub struct WktParser;

impl BoundaryParser for WktParser {
    type Region = MultiPolygon<f64>;

    fn parse(&self, geometry: &str) -> Result<Self::Region, SpatialError> {
        parse_wkt_boundary(geometry)
    }
}

/// Two-stage locode resolver.
pub struct LocodeResolver<S, P = WktParser> {
    source: S,
    parser: P,
}

impl<S: BoundarySource> LocodeResolver<S> {
    /// Creates a resolver that decodes boundaries as WKT.
    pub const fn new(source: S) -> Self {
        Self {
            source,
            parser: WktParser,
        }
    }
}

impl<S: BoundarySource, P: BoundaryParser> LocodeResolver<S, P> {
    /// Creates a resolver with a custom boundary parser.
    pub const fn with_parser(source: S, parser: P) -> Self {
        Self { source, parser }
    }

    /// Returns the locodes of every city whose boundary contains the point.
    ///
    /// Points on a boundary edge count as contained. The result may be
    /// empty. When no bounding box contains the point, no geometry is
    /// decoded at all.
    ///
    /// # Errors
    ///
    /// * [`GeoError::InvalidInput`] if either coordinate is not finite
    /// * [`GeoError::Geometry`] if a candidate's stored geometry is corrupt
    /// * [`GeoError::Database`] if the candidates cannot be fetched
    pub fn resolve(&self, lat: f64, lon: f64) -> Result<BTreeSet<String>, GeoError> {
        validate_coordinate("lat", lat)?;
        validate_coordinate("lon", lon)?;

        let candidates = self.source.candidates_at(lat, lon)?;
        log::debug!("{} bbox candidates for ({lat}, {lon})", candidates.len());

        let mut locodes = BTreeSet::new();
        for candidate in candidates {
            let region = self
                .parser
                .parse(&candidate.geometry)
                .map_err(|source| GeoError::Geometry {
                    locode: candidate.locode.clone(),
                    source,
                })?;

            if region.covers(lon, lat) {
                locodes.insert(candidate.locode);
            }
        }

        Ok(locodes)
    }
}

/// Resolves a point against the boundaries in `store`.
///
/// # Errors
///
/// See [`LocodeResolver::resolve`].
pub fn resolve_locodes(store: &Store, lat: f64, lon: f64) -> Result<BTreeSet<String>, GeoError> {
    LocodeResolver::new(store).resolve(lat, lon)
}

fn validate_coordinate(name: &str, value: f64) -> Result<(), GeoError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(GeoError::InvalidInput {
            message: format!("{name} must be a finite number, got {value}"),
        })
    }
}
