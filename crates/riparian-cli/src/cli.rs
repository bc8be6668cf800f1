use clap::{Parser, Subcommand};
use riparian_geo::SortStrategy;
use std::path::PathBuf;

/// Riparian - maintenance prioritization along waterways
#[derive(Parser, Debug)]
#[command(name = "riparian")]
#[command(about = "Rank maintenance priority zones along waterways", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (TOML); defaults to ./riparian.toml when present
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank grid cells by weighted multi-criteria score
    Zones(ZonesArgs),

    /// Find the nearest waterway to each issue
    Nearest(NearestArgs),

    /// List issues by distance from a location
    Rank(RankArgs),

    /// Show the effective configuration and where each value came from
    Config,
}

#[derive(Parser, Debug)]
pub struct ZonesArgs {
    /// Issue reports (JSON array)
    #[arg(long, value_name = "FILE")]
    pub issues: PathBuf,

    /// Waterways (JSON array or GeoJSON FeatureCollection)
    #[arg(long, value_name = "FILE")]
    pub waterways: PathBuf,

    /// Grid cell edge length in meters
    #[arg(long, value_name = "METERS")]
    pub grid_size: Option<String>,

    /// Distance from a cell center that counts as near water, in meters
    #[arg(long, value_name = "METERS")]
    pub water_threshold: Option<String>,

    /// Criteria weights: density,water,severity,recurrence (e.g. "0.35,0.25,0.25,0.15")
    #[arg(long, value_name = "D,W,S,R")]
    pub weights: Option<String>,

    /// Show only the top N zones
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

#[derive(Parser, Debug)]
pub struct NearestArgs {
    /// Issue reports (JSON array)
    #[arg(long, value_name = "FILE")]
    pub issues: PathBuf,

    /// Waterways (JSON array or GeoJSON FeatureCollection)
    #[arg(long, value_name = "FILE")]
    pub waterways: PathBuf,
}

#[derive(Parser, Debug)]
pub struct RankArgs {
    /// Issue reports (JSON array)
    #[arg(long, value_name = "FILE")]
    pub issues: PathBuf,

    /// Reference latitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// Reference longitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lon: f64,

    /// Ordering of the result
    #[arg(long, value_enum, default_value = "distance")]
    pub sort: SortArg,

    /// Show only the first N issues
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

/// Issue list ordering
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SortArg {
    /// Nearest first
    Distance,
    /// Most severe first
    Severity,
    /// Most recently reported first
    Recency,
}

impl From<SortArg> for SortStrategy {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Distance => SortStrategy::Distance,
            SortArg::Severity => SortStrategy::Severity,
            SortArg::Recency => SortStrategy::Recency,
        }
    }
}
