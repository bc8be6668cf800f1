use serde::{Deserialize, Serialize};

/// Caller-supplied weights for the four cell criteria
///
/// Weights need not sum to 1: zone scores are scaled against the batch
/// maximum, not against a fixed total. Values outside `[0, 1]` are passed
/// through unchanged, never clamped; use [`CriteriaWeights::out_of_range`]
/// to validate upstream if stricter behavior is wanted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaWeights {
    pub issue_density: f64,
    pub water_proximity: f64,
    pub severity_factor: f64,
    pub recurrence: f64,
}

impl Default for CriteriaWeights {
    fn default() -> Self {
        Self {
            issue_density: 0.35,
            water_proximity: 0.25,
            severity_factor: 0.25,
            recurrence: 0.15,
        }
    }
}

impl CriteriaWeights {
    pub fn new(issue_density: f64, water_proximity: f64, severity_factor: f64, recurrence: f64) -> Self {
        Self { issue_density, water_proximity, severity_factor, recurrence }
    }

    /// Named weights, in scoring order
    pub fn entries(&self) -> [(&'static str, f64); 4] {
        [
            ("issue_density", self.issue_density),
            ("water_proximity", self.water_proximity),
            ("severity_factor", self.severity_factor),
            ("recurrence", self.recurrence),
        ]
    }

    pub fn sum(&self) -> f64 {
        self.entries().iter().map(|(_, w)| w).sum()
    }

    /// Every weight is zero, so every raw score will be zero
    pub fn is_degenerate(&self) -> bool {
        self.entries().iter().all(|(_, w)| *w == 0.0)
    }

    /// Names of weights that are non-finite or outside `[0, 1]`
    pub fn out_of_range(&self) -> Vec<&'static str> {
        self.entries()
            .iter()
            .filter(|(_, w)| !w.is_finite() || !(0.0..=1.0).contains(w))
            .map(|(name, _)| *name)
            .collect()
    }
}

/// Calibration constants for grid aggregation and the water criterion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneSettings {
    /// Grid cell edge length in meters
    pub grid_size_meters: f64,
    /// A cell center closer than this to any waterway counts as near water
    pub water_proximity_meters: f64,
}

impl ZoneSettings {
    pub const DEFAULT_GRID_SIZE_METERS: f64 = 200.0;
    pub const DEFAULT_WATER_PROXIMITY_METERS: f64 = 150.0;
    /// Smallest usable grid edge; finer grids overflow integer cell keys
    pub const MIN_GRID_SIZE_METERS: f64 = 1.0;
}

impl Default for ZoneSettings {
    fn default() -> Self {
        Self {
            grid_size_meters: Self::DEFAULT_GRID_SIZE_METERS,
            water_proximity_meters: Self::DEFAULT_WATER_PROXIMITY_METERS,
        }
    }
}
