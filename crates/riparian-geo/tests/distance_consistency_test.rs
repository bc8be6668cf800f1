//! Property tests: every caller measures the same two points the same way.

use proptest::prelude::*;
use riparian_core::models::{DistanceUnit, GeoPoint, IssueRecord, WaterwayFeature};
use riparian_geo::nearest::nearest_waterways;
use riparian_geo::proximity::annotate_distances;
use riparian_geo::{haversine_distance, point_to_segment_meters, WaterwayIndex};

fn point() -> impl Strategy<Value = GeoPoint> {
    (-80.0f64..80.0, -179.0f64..179.0).prop_map(|(lat, lon)| GeoPoint::new(lat, lon))
}

fn nearby(origin: GeoPoint) -> impl Strategy<Value = GeoPoint> {
    (-0.05f64..0.05, -0.05f64..0.05)
        .prop_map(move |(dlat, dlon)| GeoPoint::new(origin.lat + dlat, origin.lon + dlon))
}

fn close_pair() -> impl Strategy<Value = (GeoPoint, GeoPoint)> {
    point().prop_flat_map(|a| (Just(a), nearby(a)))
}

proptest! {
    #[test]
    fn haversine_is_symmetric((a, b) in close_pair()) {
        let ab = haversine_distance(a, b);
        let ba = haversine_distance(b, a);
        prop_assert!((ab - ba).abs() < 1e-6);
        prop_assert!(ab >= 0.0);
    }

    #[test]
    fn ranker_miles_match_canonical_meters((a, b) in close_pair()) {
        let issue = IssueRecord::new("i", b, "low", "debris");
        let ranked = annotate_distances(a, &[issue]);
        let miles = ranked[0].distance_miles.unwrap();
        prop_assert!((DistanceUnit::Miles.to_meters(miles) - haversine_distance(a, b)).abs() < 1e-6);
    }

    #[test]
    fn locator_feet_match_canonical_meters((a, b) in close_pair()) {
        // A zero-length waterway degenerates to its single position
        let waterway = WaterwayFeature::line("w", "Spring Run", &[b, b]);
        let issue = IssueRecord::new("i", a, "low", "debris");
        let results = nearest_waterways(&[issue], &[waterway]);
        let feet = results["i"].distance_feet;
        prop_assert!((DistanceUnit::Feet.to_meters(feet) - haversine_distance(a, b)).abs() < 1e-6);
    }

    #[test]
    fn segment_distance_never_exceeds_endpoints(
        (start, end) in close_pair(),
        offset in (-0.05f64..0.05, -0.05f64..0.05),
    ) {
        let p = GeoPoint::new(start.lat + offset.0, start.lon + offset.1);
        let d = point_to_segment_meters(p, start, end);
        prop_assert!(d <= haversine_distance(p, start) + 1e-6);
        prop_assert!(d <= haversine_distance(p, end) + 1e-6);
        prop_assert!(d >= 0.0);
    }

    #[test]
    fn index_within_agrees_with_nearest((a, b) in close_pair(), threshold in 1.0f64..5000.0) {
        let waterway = WaterwayFeature::line("w", "Creek", &[b, GeoPoint::new(b.lat + 0.01, b.lon)]);
        let index = WaterwayIndex::build(&[waterway]);
        let (_, nearest) = index.nearest(a).unwrap();
        prop_assert_eq!(index.is_within(a, threshold), nearest <= threshold);
    }
}
