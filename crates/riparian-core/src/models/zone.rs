use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::GeoPoint;

/// Priority label assigned from a batch-normalized score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriorityLabel {
    Low,
    Moderate,
    High,
    Critical,
}

impl PriorityLabel {
    /// Classify a normalized score in `[0, 1]`
    pub fn from_normalized(score: f64) -> Self {
        if score > 0.7 {
            PriorityLabel::Critical
        } else if score > 0.4 {
            PriorityLabel::High
        } else if score > 0.2 {
            PriorityLabel::Moderate
        } else {
            PriorityLabel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityLabel::Low => "Low",
            PriorityLabel::Moderate => "Moderate",
            PriorityLabel::High => "High",
            PriorityLabel::Critical => "Critical",
        }
    }
}

impl fmt::Display for PriorityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four weight-independent sub-scores of one grid cell, each in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellScores {
    pub density: f64,
    pub water: f64,
    pub severity: f64,
    pub recurrence: f64,
}

/// A ranked grid cell warranting attention
///
/// Scores are relative to the batch they were computed in; a zone has no
/// identity across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityZone {
    pub center: GeoPoint,
    pub raw_score: f64,
    pub normalized_score: f64,
    pub issue_count: usize,
    pub critical_or_high_count: usize,
    pub near_water: bool,
    /// Distinct issue categories, compared ignoring case and surrounding whitespace
    pub distinct_categories: usize,
    pub label: PriorityLabel,
    pub scores: CellScores,
}

/// Nearest waterway to one issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearestWaterwayResult {
    pub issue_id: String,
    pub waterway_name: String,
    pub distance_feet: f64,
}

/// Issue id to nearest waterway, ordered by issue id
pub type NearestWaterwayMap = BTreeMap<String, NearestWaterwayResult>;
