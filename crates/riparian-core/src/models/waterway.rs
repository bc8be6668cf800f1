use serde::{Deserialize, Serialize};

use super::{GeoPoint, Geometry};

/// A named linear hydrological feature (stream, ditch, canal, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterwayFeature {
    pub id: String,
    pub name: String,
    pub geometry: Geometry,
}

impl WaterwayFeature {
    pub fn new(id: impl Into<String>, name: impl Into<String>, geometry: Geometry) -> Self {
        Self { id: id.into(), name: name.into(), geometry }
    }

    /// Single connected line
    pub fn line(id: impl Into<String>, name: impl Into<String>, points: &[GeoPoint]) -> Self {
        Self::new(id, name, Geometry::line_string(points))
    }

    /// Multi-part line belonging to one logical feature
    pub fn multi_line(
        id: impl Into<String>,
        name: impl Into<String>,
        parts: &[Vec<GeoPoint>],
    ) -> Self {
        Self::new(id, name, Geometry::multi_line_string(parts))
    }
}
