use crate::models::{from_coord, GeometryExt};
use geo::{LineString, MultiLineString};
use riparian_core::error::{Result, RiparianError};
use riparian_core::models::{Geometry, WaterwayFeature};

/// Why a single line part is unusable, if it is
fn line_defect(line: &LineString<f64>) -> Option<String> {
    if line.0.len() < 2 {
        return Some(format!("LineString must have at least 2 points, found {}", line.0.len()));
    }

    line.0.iter().enumerate().find_map(|(i, coord)| {
        if from_coord(*coord).is_valid() {
            None
        } else {
            Some(format!("Point {} ({}, {}) is not a valid WGS84 coordinate", i, coord.x, coord.y))
        }
    })
}

/// Usable line parts of a waterway
///
/// Malformed parts of a multi-line are dropped with a warning; the feature
/// is only rejected when no usable part remains.
pub fn waterway_lines(feature: &WaterwayFeature) -> Result<MultiLineString<f64>> {
    let lines = feature.geometry.to_geo_lines().ok_or_else(|| {
        RiparianError::malformed(
            &feature.id,
            format!(
                "Expected LineString or MultiLineString, found {}",
                feature.geometry.type_name()
            ),
        )
    })?;

    let total = lines.0.len();
    let mut first_defect = None;
    let usable: Vec<LineString<f64>> = lines
        .0
        .into_iter()
        .enumerate()
        .filter_map(|(i, line)| match line_defect(&line) {
            None => Some(line),
            Some(reason) => {
                tracing::warn!(
                    waterway = %feature.id,
                    part = i,
                    reason = %reason,
                    "Skipping malformed waterway part"
                );
                if first_defect.is_none() {
                    first_defect = Some(reason);
                }
                None
            }
        })
        .collect();

    if usable.is_empty() {
        let reason = first_defect.unwrap_or_else(|| "Geometry has no line parts".to_string());
        return Err(RiparianError::malformed(&feature.id, format!("{} (0 of {} parts usable)", reason, total)));
    }

    Ok(MultiLineString::new(usable))
}

#[cfg(test)]
mod tests {
    use super::*;
    use riparian_core::models::GeoPoint;

    fn feature(geometry: Geometry) -> WaterwayFeature {
        WaterwayFeature::new("w1", "Mill Creek", geometry)
    }

    #[test]
    fn test_valid_line() {
        let geom = Geometry::line_string(&[GeoPoint::new(45.0, -122.0), GeoPoint::new(45.01, -122.0)]);
        assert_eq!(waterway_lines(&feature(geom)).unwrap().0.len(), 1);
    }

    #[test]
    fn test_single_point_line_is_invalid() {
        let geom = Geometry::line_string(&[GeoPoint::new(45.0, -122.0)]);
        let err = waterway_lines(&feature(geom)).unwrap_err();
        assert!(err.to_string().contains("at least 2 points"));
    }

    #[test]
    fn test_non_finite_coordinates_are_invalid() {
        let geom = Geometry::LineString { coordinates: vec![[-122.0, 45.0], [f64::NAN, 45.1]] };
        assert!(waterway_lines(&feature(geom)).is_err());
    }

    #[test]
    fn test_unsupported_and_empty_are_invalid() {
        assert!(waterway_lines(&feature(Geometry::Unsupported)).is_err());
        let err = waterway_lines(&feature(Geometry::MultiLineString { coordinates: vec![] })).unwrap_err();
        assert!(err.to_string().contains("0 of 0 parts usable"));
    }

    #[test]
    fn test_multi_line_keeps_only_good_parts() {
        let geom = Geometry::MultiLineString {
            coordinates: vec![
                vec![[0.0, 0.0], [0.0, 1.0]],
                vec![[0.0, 0.0]],
                vec![[0.0, 0.0], [200.0, 1.0]],
            ],
        };
        let lines = waterway_lines(&feature(geom)).unwrap();
        assert_eq!(lines.0.len(), 1);
        assert_eq!(lines.0[0].0[1].y, 1.0);
    }

    #[test]
    fn test_waterway_lines_drops_bad_parts() {
        let feature = WaterwayFeature::new(
            "w1",
            "Mill Creek",
            Geometry::MultiLineString {
                coordinates: vec![vec![[0.0, 0.0], [0.0, 1.0]], vec![[f64::INFINITY, 0.0], [0.0, 0.0]]],
            },
        );
        let lines = waterway_lines(&feature).unwrap();
        assert_eq!(lines.0.len(), 1);
    }

    #[test]
    fn test_waterway_lines_rejects_unusable_feature() {
        let feature = WaterwayFeature::new("w2", "Dry Ditch", Geometry::LineString { coordinates: vec![] });
        let err = waterway_lines(&feature).unwrap_err();
        assert!(matches!(err, RiparianError::MalformedGeometry { ref feature_id, .. } if feature_id == "w2"));

        let point = WaterwayFeature::new("w3", "Spring", Geometry::point(GeoPoint::new(1.0, 1.0)));
        assert!(waterway_lines(&point).is_err());
    }
}
