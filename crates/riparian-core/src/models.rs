pub mod geometry;
pub mod issue;
pub mod waterway;
pub mod weights;
pub mod zone;

pub use geometry::{DistanceUnit, GeoPoint, Geometry};
pub use issue::{IssueRecord, IssueStatus, Severity};
pub use waterway::WaterwayFeature;
pub use weights::{CriteriaWeights, ZoneSettings};
pub use zone::{CellScores, NearestWaterwayMap, NearestWaterwayResult, PriorityLabel, PriorityZone};
