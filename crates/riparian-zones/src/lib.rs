//! Riparian Zones - Grid aggregation and multi-criteria zone ranking
//!
//! `issues, weights -> grid -> cell scores -> normalization -> ranked zones`.
//!
//! Ranking is relative to the batch being scored: the top zone of any run
//! normalizes to 1.0, so a "Critical" zone in a calm dataset may be a mild
//! problem. The output answers "where, among what is in front of me right
//! now, should I focus?", not "is this an absolute emergency?".

pub mod grid;
pub mod normalize;
pub mod pipeline;
pub mod scoring;

pub use grid::{aggregate, CellKey, GridCell};
pub use normalize::{normalize_scores, rank_zones, VISIBILITY_THRESHOLD};
pub use pipeline::{compute_zones, CacheStats, ZonePipeline};
pub use scoring::{build_profiles, profile_cell, CellProfile};
