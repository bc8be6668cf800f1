//! Canonical geometry types used across all riparian crates.
//!
//! Points are WGS84 latitude/longitude in degrees. Line geometry mirrors
//! GeoJSON, so coordinate pairs are stored `[lon, lat]`.

use serde::{Deserialize, Serialize};

/// Meters in one international foot
pub const METERS_PER_FOOT: f64 = 0.3048;

/// Meters in one statute mile
pub const METERS_PER_MILE: f64 = 1609.344;

/// A WGS84 position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Build from a GeoJSON `[lon, lat]` pair
    pub fn from_lon_lat(coords: [f64; 2]) -> Self {
        Self { lat: coords[1], lon: coords[0] }
    }

    /// GeoJSON `[lon, lat]` pair
    pub fn to_lon_lat(&self) -> [f64; 2] {
        [self.lon, self.lat]
    }

    /// Finite and inside the WGS84 latitude/longitude ranges
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// Distance units for spatial operations
///
/// Every distance inside the engine is meters; this table is the only place
/// other units are derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DistanceUnit {
    #[default]
    Meters,
    Kilometers,
    Miles,
    Feet,
}

impl DistanceUnit {
    /// Convert a distance value to meters
    pub fn to_meters(&self, value: f64) -> f64 {
        match self {
            DistanceUnit::Meters => value,
            DistanceUnit::Kilometers => value * 1000.0,
            DistanceUnit::Miles => value * METERS_PER_MILE,
            DistanceUnit::Feet => value * METERS_PER_FOOT,
        }
    }

    /// Convert a distance value from meters to this unit
    pub fn from_meters(&self, meters: f64) -> f64 {
        match self {
            DistanceUnit::Meters => meters,
            DistanceUnit::Kilometers => meters / 1000.0,
            DistanceUnit::Miles => meters / METERS_PER_MILE,
            DistanceUnit::Feet => meters / METERS_PER_FOOT,
        }
    }
}

/// GeoJSON-compatible geometry representation
///
/// Only the shapes the engine can use are modelled. Any other GeoJSON type
/// (Polygon, MultiPoint, ...) deserializes as `Unsupported` so callers can
/// skip it explicitly instead of failing the whole feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point {
        coordinates: [f64; 2],
    },
    LineString {
        coordinates: Vec<[f64; 2]>,
    },
    MultiLineString {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
    #[serde(other)]
    Unsupported,
}

impl Geometry {
    /// Create a Point geometry
    pub fn point(point: GeoPoint) -> Self {
        Geometry::Point { coordinates: point.to_lon_lat() }
    }

    /// Create a LineString geometry from ordered points
    pub fn line_string(points: &[GeoPoint]) -> Self {
        Geometry::LineString {
            coordinates: points.iter().map(GeoPoint::to_lon_lat).collect(),
        }
    }

    /// Create a MultiLineString geometry from disconnected parts
    pub fn multi_line_string(parts: &[Vec<GeoPoint>]) -> Self {
        Geometry::MultiLineString {
            coordinates: parts
                .iter()
                .map(|part| part.iter().map(GeoPoint::to_lon_lat).collect())
                .collect(),
        }
    }

    /// GeoJSON type name
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point { .. } => "Point",
            Geometry::LineString { .. } => "LineString",
            Geometry::MultiLineString { .. } => "MultiLineString",
            Geometry::Unsupported => "Unsupported",
        }
    }

    /// Parse from a GeoJSON geometry object
    pub fn from_geojson(value: &serde_json::Value) -> crate::Result<Self> {
        Ok(Self::deserialize(value)?)
    }
}
