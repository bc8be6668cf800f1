//! Fixed-size spatial binning of issue points.
//!
//! The grid edge is converted from meters to degrees with a single constant
//! (1 degree = 111,320 m) for both axes. That is an equirectangular
//! simplification: cells are square in degrees, so they shrink east-west as
//! latitude grows. Acceptable at district scale, inaccurate near the poles.

use riparian_core::models::{GeoPoint, IssueRecord, ZoneSettings};
use std::collections::BTreeMap;

/// Approximate meters per degree used for the grid conversion
pub const METERS_PER_DEGREE: f64 = 111_320.0;

/// Integer cell coordinates: multiples of the degree edge length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    pub row: i64,
    pub col: i64,
}

impl CellKey {
    /// Round a point to the nearest cell (halves round away from zero)
    pub fn for_point(point: GeoPoint, edge_degrees: f64) -> Self {
        Self {
            row: (point.lat / edge_degrees).round() as i64,
            col: (point.lon / edge_degrees).round() as i64,
        }
    }

    pub fn center(&self, edge_degrees: f64) -> GeoPoint {
        GeoPoint::new(self.row as f64 * edge_degrees, self.col as f64 * edge_degrees)
    }
}

/// Ephemeral aggregation bucket; never empty
#[derive(Debug, Clone)]
pub struct GridCell {
    pub key: CellKey,
    pub center: GeoPoint,
    pub issues: Vec<IssueRecord>,
}

/// Grid edge length in degrees
///
/// A non-finite size, or one below [`ZoneSettings::MIN_GRID_SIZE_METERS`],
/// falls back to the default.
pub fn cell_edge_degrees(grid_size_meters: f64) -> f64 {
    let meters = if grid_size_meters.is_finite()
        && grid_size_meters >= ZoneSettings::MIN_GRID_SIZE_METERS
    {
        grid_size_meters
    } else {
        tracing::warn!(
            grid_size_meters,
            "Invalid grid size, using {} m",
            ZoneSettings::DEFAULT_GRID_SIZE_METERS
        );
        ZoneSettings::DEFAULT_GRID_SIZE_METERS
    };
    meters / METERS_PER_DEGREE
}

/// Group issues into grid cells, ordered by cell key
///
/// Issues with unusable coordinates are skipped. Empty input gives an empty
/// grid.
pub fn aggregate(issues: &[IssueRecord], grid_size_meters: f64) -> Vec<GridCell> {
    let edge = cell_edge_degrees(grid_size_meters);
    let mut buckets: BTreeMap<CellKey, Vec<IssueRecord>> = BTreeMap::new();

    for issue in issues {
        if !issue.location.is_valid() {
            tracing::warn!(issue = %issue.id, "Skipping issue with invalid location");
            continue;
        }
        buckets
            .entry(CellKey::for_point(issue.location, edge))
            .or_default()
            .push(issue.clone());
    }

    buckets
        .into_iter()
        .map(|(key, issues)| GridCell { key, center: key.center(edge), issues })
        .collect()
}
