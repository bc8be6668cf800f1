use crate::distance::point_to_lines_meters;
use crate::validation::waterway_lines;
use geo::MultiLineString;
use riparian_core::models::{
    DistanceUnit, GeoPoint, IssueRecord, NearestWaterwayMap, NearestWaterwayResult,
    WaterwayFeature,
};

/// A waterway whose geometry passed validation
#[derive(Debug, Clone)]
struct PreparedWaterway {
    id: String,
    name: String,
    lines: MultiLineString<f64>,
}

/// Validated waterway geometry ready for repeated distance queries
///
/// Malformed features are dropped once, at build time, so a bad feature
/// never affects the results of the others.
#[derive(Debug, Clone, Default)]
pub struct WaterwayIndex {
    waterways: Vec<PreparedWaterway>,
    skipped: Vec<String>,
}

impl WaterwayIndex {
    /// Build an index from a waterway feed, skipping malformed features
    pub fn build(features: &[WaterwayFeature]) -> Self {
        let mut index = Self::default();

        for feature in features {
            match waterway_lines(feature) {
                Ok(lines) => index.waterways.push(PreparedWaterway {
                    id: feature.id.clone(),
                    name: feature.name.clone(),
                    lines,
                }),
                Err(e) => {
                    tracing::warn!(waterway = %feature.id, error = %e, "Skipping waterway");
                    index.skipped.push(feature.id.clone());
                }
            }
        }

        tracing::debug!(
            usable = index.waterways.len(),
            skipped = index.skipped.len(),
            "Built waterway index"
        );

        index
    }

    /// Number of usable waterways
    pub fn len(&self) -> usize {
        self.waterways.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waterways.is_empty()
    }

    /// Ids of features rejected as malformed
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    /// Nearest waterway name and distance in meters
    ///
    /// On an exact tie the feature that came first in the feed wins.
    pub fn nearest(&self, point: GeoPoint) -> Option<(&str, f64)> {
        if !point.is_valid() {
            return None;
        }

        let mut best: Option<(&PreparedWaterway, f64)> = None;
        for waterway in &self.waterways {
            let Some(distance) = point_to_lines_meters(point, &waterway.lines) else {
                continue;
            };
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((waterway, distance));
            }
        }

        best.map(|(waterway, distance)| (waterway.name.as_str(), distance))
    }

    /// Whether any waterway lies within `meters` of `point`
    pub fn is_within(&self, point: GeoPoint, meters: f64) -> bool {
        point.is_valid()
            && self
                .waterways
                .iter()
                .any(|w| point_to_lines_meters(point, &w.lines).is_some_and(|d| d <= meters))
    }
}

/// Nearest waterway for every issue
///
/// Issues with an unusable location, or no usable waterway at all, are
/// omitted. Cost is O(issues x waterway segments).
pub fn nearest_waterways(issues: &[IssueRecord], waterways: &[WaterwayFeature]) -> NearestWaterwayMap {
    let index = WaterwayIndex::build(waterways);
    nearest_in_index(issues, &index)
}

/// Nearest waterway for every issue against a prebuilt index
pub fn nearest_in_index(issues: &[IssueRecord], index: &WaterwayIndex) -> NearestWaterwayMap {
    let mut results = NearestWaterwayMap::new();
    if index.is_empty() {
        return results;
    }

    for issue in issues {
        if !issue.location.is_valid() {
            tracing::warn!(issue = %issue.id, "Skipping issue with invalid location");
            continue;
        }
        if results.contains_key(&issue.id) {
            tracing::debug!(issue = %issue.id, "Duplicate issue id, keeping first");
            continue;
        }
        if let Some((name, meters)) = index.nearest(issue.location) {
            results.insert(
                issue.id.clone(),
                NearestWaterwayResult {
                    issue_id: issue.id.clone(),
                    waterway_name: name.to_string(),
                    distance_feet: DistanceUnit::Feet.from_meters(meters),
                },
            );
        }
    }

    results
}
