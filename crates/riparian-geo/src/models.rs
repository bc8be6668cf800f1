//! Conversions between riparian-core geometry and the `geo` crate.
//!
//! `geo` coordinates are planar `(x, y)`; here `x` is always longitude and
//! `y` latitude, matching GeoJSON ordering.

use geo::{Coord, LineString, MultiLineString};
use riparian_core::models::{GeoPoint, Geometry};

/// Convert a point to a `geo` coordinate
pub fn to_coord(point: GeoPoint) -> Coord<f64> {
    Coord { x: point.lon, y: point.lat }
}

/// Convert a `geo` coordinate back to a point
pub fn from_coord(coord: Coord<f64>) -> GeoPoint {
    GeoPoint::new(coord.y, coord.x)
}

fn to_line_string(coords: &[[f64; 2]]) -> LineString<f64> {
    LineString::new(coords.iter().map(|c| Coord { x: c[0], y: c[1] }).collect())
}

/// Extension trait for Geometry with geo-crate conversions
pub trait GeometryExt {
    /// Line parts of this geometry, unvalidated
    ///
    /// `None` for shapes that have no linear interpretation.
    fn to_geo_lines(&self) -> Option<MultiLineString<f64>>;
}

impl GeometryExt for Geometry {
    fn to_geo_lines(&self) -> Option<MultiLineString<f64>> {
        match self {
            Geometry::LineString { coordinates } => {
                Some(MultiLineString::new(vec![to_line_string(coordinates)]))
            }
            Geometry::MultiLineString { coordinates } => Some(MultiLineString::new(
                coordinates.iter().map(|part| to_line_string(part)).collect(),
            )),
            Geometry::Point { .. } | Geometry::Unsupported => None,
        }
    }
}
