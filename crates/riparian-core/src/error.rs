//! Error types for Riparian

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RiparianError {
    // Geometry errors
    #[error("Malformed geometry at feature {feature_id}: {reason}")]
    MalformedGeometry {
        feature_id: String,
        reason: String,
    },

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RiparianError {
    /// Shorthand for a malformed-geometry error on a named feature
    pub fn malformed(feature_id: impl Into<String>, reason: impl Into<String>) -> Self {
        RiparianError::MalformedGeometry {
            feature_id: feature_id.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for RiparianError {
    fn from(err: serde_json::Error) -> Self {
        RiparianError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RiparianError>;
