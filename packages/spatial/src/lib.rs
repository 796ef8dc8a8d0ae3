#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geometry capability for boundary attribution.
//!
//! City boundaries are stored as WKT polygons or multipolygons. This crate
//! decodes them into [`MultiPolygon`]s and answers "does this region cover
//! the point?" through the [`Region`] trait, so that callers can swap in
//! synthetic regions when the real geometry is beside the point.
//!
//! Containment is boundary-inclusive: a point lying exactly on an edge or
//! vertex is covered.

use geo::coordinate_position::{CoordPos, CoordinatePosition};
use geo::{Coord, MultiPolygon};
use wkt::TryFromWkt;

/// Errors that can occur while decoding a stored boundary.
#[derive(Debug, thiserror::Error)]
pub enum SpatialError {
    /// The text is not valid WKT.
    #[error("Invalid WKT: {message}")]
    Wkt {
        /// Parser message.
        message: String,
    },

    /// The WKT decoded to something other than an areal geometry.
    #[error("Expected POLYGON or MULTIPOLYGON, found {found}")]
    NotAreal {
        /// Name of the geometry type that was found.
        found: &'static str,
    },
}

/// Something that can answer a point-containment question.
pub trait Region {
    /// Whether the point at (`lon`, `lat`) lies inside or on the boundary
    /// of this region.
    fn covers(&self, lon: f64, lat: f64) -> bool;
}

impl Region for MultiPolygon<f64> {
    fn covers(&self, lon: f64, lat: f64) -> bool {
        self.coordinate_position(&Coord { x: lon, y: lat }) != CoordPos::Outside
    }
}

/// Decodes a WKT `POLYGON` or `MULTIPOLYGON` into a [`MultiPolygon`].
///
/// # Errors
///
/// Returns [`SpatialError`] if the text does not parse or describes a
/// non-areal geometry.
pub fn parse_wkt_boundary(text: &str) -> Result<MultiPolygon<f64>, SpatialError> {
    let geometry = <geo::Geometry<f64> as TryFromWkt<f64>>::try_from_wkt_str(text)
        .map_err(|e| SpatialError::Wkt {
            message: e.to_string(),
        })?;

    match geometry {
        geo::Geometry::MultiPolygon(mp) => Ok(mp),
        geo::Geometry::Polygon(p) => Ok(MultiPolygon(vec![p])),
        other => {
            let found = geometry_type_name(&other);
            log::warn!("Boundary WKT decoded to {found}, not an areal geometry");
            Err(SpatialError::NotAreal { found })
        }
    }
}

const fn geometry_type_name(geometry: &geo::Geometry<f64>) -> &'static str {
    match geometry {
        geo::Geometry::Point(_) => "POINT",
        geo::Geometry::Line(_) => "LINE",
        geo::Geometry::LineString(_) => "LINESTRING",
        geo::Geometry::Polygon(_) => "POLYGON",
        geo::Geometry::MultiPoint(_) => "MULTIPOINT",
        geo::Geometry::MultiLineString(_) => "MULTILINESTRING",
        geo::Geometry::MultiPolygon(_) => "MULTIPOLYGON",
        geo::Geometry::GeometryCollection(_) => "GEOMETRYCOLLECTION",
        geo::Geometry::Rect(_) => "RECT",
        geo::Geometry::Triangle(_) => "TRIANGLE",
    }
}
