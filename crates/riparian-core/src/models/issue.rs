use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::GeoPoint;

/// Reported severity of a maintenance issue
///
/// Parsing is case-insensitive. Any value outside the four known levels is
/// kept as `Unrecognized` rather than rejected, and scores like `Medium`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
    Unrecognized(String),
}

impl Severity {
    /// Contribution of one issue to a cell's severity factor
    pub fn weight(&self) -> f64 {
        match self {
            Severity::Critical => 1.0,
            Severity::High => 0.75,
            Severity::Medium => 0.4,
            Severity::Low => 0.15,
            Severity::Unrecognized(_) => 0.4,
        }
    }

    /// Ordering key for severity-first sorting (higher is more urgent)
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Critical => 4,
            Severity::High => 3,
            Severity::Medium | Severity::Unrecognized(_) => 2,
            Severity::Low => 1,
        }
    }

    pub fn is_critical_or_high(&self) -> bool {
        matches!(self, Severity::Critical | Severity::High)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
            Severity::Unrecognized(raw) => raw,
        }
    }
}

impl From<String> for Severity {
    fn from(raw: String) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "low" => Severity::Low,
            "medium" => Severity::Medium,
            "high" => Severity::High,
            "critical" => Severity::Critical,
            _ => Severity::Unrecognized(raw),
        }
    }
}

impl From<&str> for Severity {
    fn from(raw: &str) -> Self {
        Severity::from(raw.to_string())
    }
}

impl From<Severity> for String {
    fn from(severity: Severity) -> Self {
        severity.as_str().to_string()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Workflow status of an issue in the external maintenance store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
    #[serde(other)]
    Other,
}

/// Immutable snapshot of one geolocated maintenance report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueRecord {
    pub id: String,
    pub location: GeoPoint,
    pub severity: Severity,
    pub category: String,
    #[serde(default)]
    pub status: IssueStatus,
    #[serde(default = "epoch")]
    pub reported_at: DateTime<Utc>,
}

fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

impl IssueRecord {
    /// Create an open issue; the report time defaults to the Unix epoch
    pub fn new(
        id: impl Into<String>,
        location: GeoPoint,
        severity: impl Into<Severity>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            location,
            severity: severity.into(),
            category: category.into(),
            status: IssueStatus::Open,
            reported_at: epoch(),
        }
    }

    pub fn with_reported_at(mut self, reported_at: DateTime<Utc>) -> Self {
        self.reported_at = reported_at;
        self
    }
}
