//! Riparian Geo - Distance primitives and waterway geometry
//!
//! This crate owns all great-circle math. The zone scorer, the
//! nearest-waterway locator, and the proximity ranker all measure through
//! [`distance`], so the same two points always yield the same distance.

pub mod distance;
pub mod models;
pub mod nearest;
pub mod proximity;
pub mod validation;

pub use distance::{
    haversine_distance, point_to_lines_meters, point_to_segment_distance, point_to_segment_meters,
    EARTH_RADIUS_METERS,
};
pub use nearest::{nearest_waterways, WaterwayIndex};
pub use proximity::{rank_by_proximity, RankedIssue, SortStrategy};
pub use validation::waterway_lines;
