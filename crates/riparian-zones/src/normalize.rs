use crate::scoring::CellProfile;
use riparian_core::models::{CriteriaWeights, PriorityLabel, PriorityZone};

/// Zones at or below this normalized score are treated as noise
pub const VISIBILITY_THRESHOLD: f64 = 0.1;

/// Scale raw scores by the batch maximum
///
/// Every result is in `[0, 1]`. When the maximum is not positive (all
/// weights zero, or nothing to score) every score is 0. Non-finite raw
/// scores count as 0.
pub fn normalize_scores(raw_scores: &[f64]) -> Vec<f64> {
    let max = raw_scores
        .iter()
        .copied()
        .filter(|s| s.is_finite())
        .fold(0.0_f64, f64::max);

    if max <= 0.0 {
        return vec![0.0; raw_scores.len()];
    }

    raw_scores
        .iter()
        .map(|&s| if s.is_finite() { (s / max).clamp(0.0, 1.0) } else { 0.0 })
        .collect()
}

/// Weight, normalize, classify, filter, and sort one batch of cells
///
/// The result is ordered by descending normalized score; equal scores keep
/// the profile order.
pub fn rank_zones(profiles: &[CellProfile], weights: &CriteriaWeights) -> Vec<PriorityZone> {
    let raw_scores: Vec<f64> = profiles.iter().map(|p| p.raw_score(weights)).collect();
    let normalized = normalize_scores(&raw_scores);

    let mut zones: Vec<PriorityZone> = profiles
        .iter()
        .zip(raw_scores)
        .zip(normalized)
        .filter(|(_, normalized)| *normalized > VISIBILITY_THRESHOLD)
        .map(|((profile, raw_score), normalized_score)| PriorityZone {
            center: profile.center,
            raw_score,
            normalized_score,
            issue_count: profile.issue_count,
            critical_or_high_count: profile.critical_or_high_count,
            near_water: profile.near_water(),
            distinct_categories: profile.distinct_categories,
            label: PriorityLabel::from_normalized(normalized_score),
            scores: profile.scores,
        })
        .collect();

    zones.sort_by(|a, b| b.normalized_score.total_cmp(&a.normalized_score));

    tracing::debug!(
        cells = profiles.len(),
        visible = zones.len(),
        "Ranked priority zones"
    );

    zones
}
