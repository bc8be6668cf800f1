//! Loading issue and waterway inputs from disk

use anyhow::{bail, Context, Result};
use riparian_core::models::{Geometry, IssueRecord, WaterwayFeature};
use riparian_core::RiparianError;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Load issue reports from a JSON array
///
/// Unreadable entries are skipped with a warning.
pub fn load_issues(path: &Path) -> Result<Vec<IssueRecord>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read issues file {}", path.display()))?;

    let values: Vec<serde_json::Value> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse issues file {}", path.display()))?;
    let issues: Vec<IssueRecord> = parse_records(values, "issue");

    tracing::debug!(count = issues.len(), path = %path.display(), "Loaded issues");
    Ok(issues)
}

/// Load waterways from a JSON array of features or a GeoJSON FeatureCollection
pub fn load_waterways(path: &Path) -> Result<Vec<WaterwayFeature>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read waterways file {}", path.display()))?;

    let waterways = parse_waterways(&content)
        .with_context(|| format!("Failed to parse waterways file {}", path.display()))?;

    tracing::debug!(count = waterways.len(), path = %path.display(), "Loaded waterways");
    Ok(waterways)
}

fn parse_waterways(content: &str) -> Result<Vec<WaterwayFeature>> {
    let value: serde_json::Value = serde_json::from_str(content)?;

    if let serde_json::Value::Array(values) = value {
        return Ok(parse_records(values, "waterway"));
    }

    let geojson: geojson::GeoJson = content.parse()?;
    match geojson {
        geojson::GeoJson::FeatureCollection(fc) => Ok(fc
            .features
            .iter()
            .enumerate()
            .filter_map(|(idx, feature)| convert_feature(feature, idx))
            .collect()),
        geojson::GeoJson::Feature(feature) => Ok(convert_feature(&feature, 0).into_iter().collect()),
        geojson::GeoJson::Geometry(_) => {
            bail!("Expected a FeatureCollection of waterways, found a bare geometry")
        }
    }
}

/// Deserialize each array entry on its own, skipping the ones that fail
fn parse_records<T: DeserializeOwned>(values: Vec<serde_json::Value>, kind: &str) -> Vec<T> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(idx, value)| {
            let id = record_id(&value).unwrap_or_else(|| format!("#{}", idx));
            match serde_json::from_value(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(kind, record = %id, error = %e, "Skipping unreadable record");
                    None
                }
            }
        })
        .collect()
}

fn record_id(value: &serde_json::Value) -> Option<String> {
    match value.get("id")? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Convert a GeoJSON feature, skipping anything that is not a line
fn convert_feature(feature: &geojson::Feature, idx: usize) -> Option<WaterwayFeature> {
    let id = feature
        .id
        .as_ref()
        .map(|id| match id {
            geojson::feature::Id::String(s) => s.clone(),
            geojson::feature::Id::Number(n) => n.to_string(),
        })
        .or_else(|| string_property(feature, "id"))
        .unwrap_or_else(|| idx.to_string());

    let name = string_property(feature, "name").unwrap_or_else(|| id.clone());

    let Some(geom) = feature.geometry.as_ref() else {
        tracing::warn!(waterway = %id, "Skipping waterway without geometry");
        return None;
    };

    let geometry = serde_json::to_value(geom)
        .map_err(RiparianError::from)
        .and_then(|value| Geometry::from_geojson(&value));

    match geometry {
        Ok(geometry @ (Geometry::LineString { .. } | Geometry::MultiLineString { .. })) => {
            Some(WaterwayFeature::new(id, name, geometry))
        }
        Ok(other) => {
            tracing::warn!(waterway = %id, geometry = other.type_name(), "Skipping non-line waterway");
            None
        }
        Err(e) => {
            tracing::warn!(waterway = %id, error = %e, "Skipping waterway with unreadable geometry");
            None
        }
    }
}

fn string_property(feature: &geojson::Feature, key: &str) -> Option<String> {
    feature.property(key).and_then(|value| match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_waterway_array() {
        let json = r#"[{"id": "w1", "name": "Mill Creek",
            "geometry": {"type": "LineString", "coordinates": [[-122.0, 45.0], [-122.0, 45.1]]}}]"#;
        let waterways = parse_waterways(json).unwrap();
        assert_eq!(waterways.len(), 1);
        assert_eq!(waterways[0].name, "Mill Creek");
    }

    #[test]
    fn test_bad_array_entry_does_not_abort_waterways() {
        let json = r#"[
            {"id": "w1", "name": "Mill Creek",
             "geometry": {"type": "LineString", "coordinates": [[-122.0, 45.0], [-122.0, 45.1]]}},
            {"id": "w2", "name": "Tall Creek",
             "geometry": {"type": "LineString", "coordinates": [[-122.1, 45.0, 12.0], [-122.1, 45.1, 15.0]]}},
            {"id": "w3", "name": "Null Creek",
             "geometry": {"type": "LineString", "coordinates": [[null, 45.0], [-122.2, 45.1]]}}
        ]"#;
        let waterways = parse_waterways(json).unwrap();
        assert_eq!(waterways.len(), 1);
        assert_eq!(waterways[0].id, "w1");
    }

    #[test]
    fn test_bad_array_entry_does_not_abort_issues() {
        let values: Vec<serde_json::Value> = serde_json::from_str(
            r#"[
                {"id": "i1", "location": {"lat": 45.5, "lon": -122.6}, "severity": "high", "category": "debris"},
                {"id": "i2", "severity": "low", "category": "litter"},
                {"id": "i3", "location": {"lat": null, "lon": -122.6}, "severity": "low", "category": "litter"},
                "not an issue"
            ]"#,
        )
        .unwrap();
        let issues: Vec<IssueRecord> = parse_records(values, "issue");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].id, "i1");
    }

    #[test]
    fn test_parse_feature_collection() {
        let json = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "id": 7, "properties": {"name": "Johnson Creek"},
             "geometry": {"type": "LineString", "coordinates": [[-122.0, 45.0], [-122.0, 45.1]]}},
            {"type": "Feature", "properties": {"id": "w2"},
             "geometry": {"type": "MultiLineString", "coordinates": [[[-122.1, 45.0], [-122.1, 45.1]]]}},
            {"type": "Feature", "properties": {"name": "Pond"},
             "geometry": {"type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]}},
            {"type": "Feature", "properties": {"name": "Gauge"}, "geometry": null}
        ]}"#;
        let waterways = parse_waterways(json).unwrap();
        assert_eq!(waterways.len(), 2);
        assert_eq!(waterways[0].id, "7");
        assert_eq!(waterways[0].name, "Johnson Creek");
        assert_eq!(waterways[1].id, "w2");
        assert_eq!(waterways[1].name, "w2");
        assert_eq!(waterways[1].geometry.type_name(), "MultiLineString");
    }

    #[test]
    fn test_bare_geometry_is_rejected() {
        let json = r#"{"type": "LineString", "coordinates": [[-122.0, 45.0], [-122.0, 45.1]]}"#;
        assert!(parse_waterways(json).is_err());
    }
}
