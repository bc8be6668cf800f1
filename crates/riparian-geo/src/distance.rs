//! Great-circle distance primitives.
//!
//! Everything is computed on a sphere of radius [`EARTH_RADIUS_METERS`] and
//! returned in meters. Other units are derived through
//! [`DistanceUnit::from_meters`] at the call site that needs them.

use crate::models::from_coord;
use geo::{Line, MultiLineString};
use riparian_core::models::{DistanceUnit, GeoPoint};

/// Mean Earth radius used by every distance in the engine
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Central angle between two points in radians (haversine form)
fn central_angle(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * h.sqrt().min(1.0).asin()
}

/// Initial great-circle bearing from `a` towards `b` in radians
fn initial_bearing(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();
    y.atan2(x)
}

/// Great-circle distance between two points in meters
pub fn haversine_distance(a: GeoPoint, b: GeoPoint) -> f64 {
    central_angle(a, b) * EARTH_RADIUS_METERS
}

/// Minimum distance in meters from `point` to any location on the segment
/// `start`-`end`
///
/// Uses the cross-track / along-track decomposition: when the perpendicular
/// foot of `point` on the great circle through the segment falls between the
/// endpoints, the cross-track distance is returned, otherwise the distance to
/// the nearer endpoint. A zero-length segment is a point.
pub fn point_to_segment_meters(point: GeoPoint, start: GeoPoint, end: GeoPoint) -> f64 {
    let d_start = central_angle(start, point);
    let d_segment = central_angle(start, end);
    if d_segment == 0.0 || d_start == 0.0 {
        return d_start * EARTH_RADIUS_METERS;
    }

    let delta = initial_bearing(start, point) - initial_bearing(start, end);

    // Foot of the perpendicular lies behind `start`
    if delta.cos() < 0.0 {
        return d_start * EARTH_RADIUS_METERS;
    }

    let cross_track = (d_start.sin() * delta.sin()).clamp(-1.0, 1.0).asin();
    let along_track = (d_start.sin() * delta.cos()).atan2(d_start.cos());

    if along_track > d_segment {
        return haversine_distance(end, point);
    }

    cross_track.abs() * EARTH_RADIUS_METERS
}

/// Point-to-segment distance in the requested unit
pub fn point_to_segment_distance(
    point: GeoPoint,
    start: GeoPoint,
    end: GeoPoint,
    unit: DistanceUnit,
) -> f64 {
    unit.from_meters(point_to_segment_meters(point, start, end))
}

/// Distance in meters from `point` to a `geo` line segment (`x` = lon, `y` = lat)
pub fn point_to_line_meters(point: GeoPoint, line: &Line<f64>) -> f64 {
    point_to_segment_meters(point, from_coord(line.start), from_coord(line.end))
}

/// Global minimum distance in meters from `point` to every segment of every part
///
/// `None` when the geometry has no segments.
pub fn point_to_lines_meters(point: GeoPoint, lines: &MultiLineString<f64>) -> Option<f64> {
    lines
        .iter()
        .flat_map(|part| part.lines())
        .map(|segment| point_to_line_meters(point, &segment))
        .min_by(f64::total_cmp)
}
