//! Distance-annotated issue lists for task-queue views.

use crate::distance::haversine_distance;
use riparian_core::models::{DistanceUnit, GeoPoint, IssueRecord};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Interchangeable orderings for an annotated issue list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortStrategy {
    /// Nearest first; issues without a distance go last
    #[default]
    Distance,
    /// Most severe first, nearest first within a level
    Severity,
    /// Most recently reported first
    Recency,
}

/// An issue decorated with its distance from a reference point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedIssue {
    pub issue: IssueRecord,
    /// `None` when either location is unusable
    pub distance_miles: Option<f64>,
}

/// Attach the great-circle distance from `reference` (miles) to each issue
pub fn annotate_distances(reference: GeoPoint, issues: &[IssueRecord]) -> Vec<RankedIssue> {
    issues
        .iter()
        .map(|issue| {
            let distance_miles = (reference.is_valid() && issue.location.is_valid())
                .then(|| DistanceUnit::Miles.from_meters(haversine_distance(reference, issue.location)));
            RankedIssue { issue: issue.clone(), distance_miles }
        })
        .collect()
}

fn by_distance(a: &RankedIssue, b: &RankedIssue) -> Ordering {
    match (a.distance_miles, b.distance_miles) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort in place; ties keep their input order
pub fn sort_issues(ranked: &mut [RankedIssue], strategy: SortStrategy) {
    match strategy {
        SortStrategy::Distance => ranked.sort_by(by_distance),
        SortStrategy::Severity => ranked.sort_by(|a, b| {
            b.issue.severity.rank().cmp(&a.issue.severity.rank()).then_with(|| by_distance(a, b))
        }),
        SortStrategy::Recency => ranked.sort_by(|a, b| b.issue.reported_at.cmp(&a.issue.reported_at)),
    }
}

/// Decorate then sort
pub fn rank_by_proximity(
    reference: GeoPoint,
    issues: &[IssueRecord],
    strategy: SortStrategy,
) -> Vec<RankedIssue> {
    let mut ranked = annotate_distances(reference, issues);
    sort_issues(&mut ranked, strategy);
    ranked
}
