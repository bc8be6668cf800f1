use riparian_core::config::ConfigSource;
use riparian_core::models::{
    CriteriaWeights, GeoPoint, NearestWaterwayMap, PriorityZone, ZoneSettings,
};
use riparian_geo::{RankedIssue, SortStrategy};
use serde::Serialize;
use std::collections::BTreeMap;
use tabled::Tabled;

/// Output for zones command
#[derive(Debug, Serialize)]
pub struct ZonesOutput {
    pub weights: CriteriaWeights,
    pub settings: ZoneSettings,
    pub issue_count: usize,
    pub waterway_count: usize,
    pub zones: Vec<PriorityZone>,
}

/// Output for nearest command
#[derive(Debug, Serialize)]
pub struct NearestOutput {
    pub issue_count: usize,
    pub skipped_waterways: Vec<String>,
    pub results: NearestWaterwayMap,
}

/// Output for rank command
#[derive(Debug, Serialize)]
pub struct RankOutput {
    pub reference: GeoPoint,
    pub sort: SortStrategy,
    pub issues: Vec<RankedIssue>,
}

/// Output for config command
#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    pub config_file: Option<String>,
    pub values: BTreeMap<String, ConfigEntry>,
}

#[derive(Debug, Serialize)]
pub struct ConfigEntry {
    pub value: String,
    pub source: ConfigSource,
}

#[derive(Tabled)]
pub struct ZoneRow {
    #[tabled(rename = "#")]
    pub rank: usize,
    #[tabled(rename = "Priority")]
    pub label: String,
    #[tabled(rename = "Score")]
    pub score: String,
    #[tabled(rename = "Center (lat, lon)")]
    pub center: String,
    #[tabled(rename = "Issues")]
    pub issues: usize,
    #[tabled(rename = "Critical/High")]
    pub critical_or_high: usize,
    #[tabled(rename = "Categories")]
    pub categories: usize,
    #[tabled(rename = "Near Water")]
    pub near_water: String,
}

impl ZoneRow {
    pub fn new(rank: usize, zone: &PriorityZone) -> Self {
        Self {
            rank,
            label: zone.label.to_string(),
            score: format!("{:.3}", zone.normalized_score),
            center: format!("{:.5}, {:.5}", zone.center.lat, zone.center.lon),
            issues: zone.issue_count,
            critical_or_high: zone.critical_or_high_count,
            categories: zone.distinct_categories,
            near_water: if zone.near_water { "✓" } else { "✗" }.to_string(),
        }
    }
}

#[derive(Tabled)]
pub struct NearestRow {
    #[tabled(rename = "Issue")]
    pub issue_id: String,
    #[tabled(rename = "Nearest Waterway")]
    pub waterway: String,
    #[tabled(rename = "Distance (ft)")]
    pub distance: String,
}

#[derive(Tabled)]
pub struct RankRow {
    #[tabled(rename = "Issue")]
    pub issue_id: String,
    #[tabled(rename = "Severity")]
    pub severity: String,
    #[tabled(rename = "Category")]
    pub category: String,
    #[tabled(rename = "Distance (mi)")]
    pub distance: String,
    #[tabled(rename = "Reported")]
    pub reported: String,
}

impl From<&RankedIssue> for RankRow {
    fn from(ranked: &RankedIssue) -> Self {
        Self {
            issue_id: ranked.issue.id.clone(),
            severity: ranked.issue.severity.to_string(),
            category: ranked.issue.category.clone(),
            distance: ranked
                .distance_miles
                .map(|d| format!("{:.2}", d))
                .unwrap_or_else(|| "-".to_string()),
            reported: ranked.issue.reported_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

#[derive(Tabled)]
pub struct ConfigRow {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}
