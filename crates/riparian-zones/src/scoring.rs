//! Per-cell criteria scores.
//!
//! A [`CellProfile`] holds everything about a cell that does not depend on
//! the weights, so a weight change only re-runs [`CellProfile::raw_score`].

use crate::grid::{aggregate, GridCell};
use riparian_core::models::{
    CellScores, CriteriaWeights, GeoPoint, IssueRecord, WaterwayFeature, ZoneSettings,
};
use riparian_geo::WaterwayIndex;
use std::collections::BTreeSet;

/// Issues per cell at which the density score saturates
pub const DENSITY_CEILING: f64 = 8.0;

/// Distinct categories per cell at which the recurrence score saturates
pub const RECURRENCE_CEILING: f64 = 4.0;

/// Weight-independent summary of one grid cell
#[derive(Debug, Clone, PartialEq)]
pub struct CellProfile {
    pub center: GeoPoint,
    pub issue_count: usize,
    pub critical_or_high_count: usize,
    /// Counted after trimming and lowercasing category names
    pub distinct_categories: usize,
    pub scores: CellScores,
}

impl CellProfile {
    pub fn near_water(&self) -> bool {
        self.scores.water > 0.0
    }

    /// Weighted sum of the four sub-scores
    pub fn raw_score(&self, weights: &CriteriaWeights) -> f64 {
        self.scores.density * weights.issue_density
            + self.scores.water * weights.water_proximity
            + self.scores.severity * weights.severity_factor
            + self.scores.recurrence * weights.recurrence
    }
}

/// Category key: case and surrounding whitespace are not significant
fn category_key(category: &str) -> String {
    category.trim().to_lowercase()
}

fn severity_factor(issues: &[IssueRecord]) -> f64 {
    issues.iter().map(|i| i.severity.weight()).sum::<f64>() / issues.len() as f64
}

/// Score one cell against the waterway index
pub fn profile_cell(cell: &GridCell, waterways: &WaterwayIndex, water_proximity_meters: f64) -> CellProfile {
    let issue_count = cell.issues.len();
    let categories: BTreeSet<String> = cell.issues.iter().map(|i| category_key(&i.category)).collect();
    let near_water = waterways.is_within(cell.center, water_proximity_meters);

    CellProfile {
        center: cell.center,
        issue_count,
        critical_or_high_count: cell.issues.iter().filter(|i| i.severity.is_critical_or_high()).count(),
        distinct_categories: categories.len(),
        scores: CellScores {
            density: (issue_count as f64 / DENSITY_CEILING).min(1.0),
            water: if near_water { 1.0 } else { 0.0 },
            severity: severity_factor(&cell.issues),
            recurrence: (categories.len() as f64 / RECURRENCE_CEILING).min(1.0),
        },
    }
}

/// Aggregate issues and profile every resulting cell
pub fn build_profiles(
    issues: &[IssueRecord],
    waterways: &[WaterwayFeature],
    settings: &ZoneSettings,
) -> Vec<CellProfile> {
    let cells = aggregate(issues, settings.grid_size_meters);
    if cells.is_empty() {
        return Vec::new();
    }

    let index = WaterwayIndex::build(waterways);
    let profiles: Vec<CellProfile> = cells
        .iter()
        .map(|cell| profile_cell(cell, &index, settings.water_proximity_meters))
        .collect();

    tracing::debug!(
        issues = issues.len(),
        cells = profiles.len(),
        waterways = index.len(),
        "Profiled grid cells"
    );

    profiles
}
