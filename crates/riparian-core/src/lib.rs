//! Riparian Core - Domain models, errors, and configuration
//!
//! This crate contains the types shared by the scoring pipeline, the
//! nearest-waterway locator, and the command-line adapter.

pub mod config;
pub mod error;
pub mod models;

pub use error::{Result, RiparianError};
