//! Zones command implementation

use crate::cli::ZonesArgs;
use crate::config_loader::load_config_with_overrides;
use crate::input::{load_issues, load_waterways};
use crate::output::OutputWriter;
use crate::output_types::{ZoneRow, ZonesOutput};
use anyhow::Result;
use riparian_core::config::{parse_meters, parse_weights, CliConfigOverrides};
use riparian_core::models::PriorityLabel;
use riparian_zones::ZonePipeline;
use std::path::Path;

pub fn execute(args: ZonesArgs, config_file: Option<&Path>, output: &OutputWriter) -> Result<()> {
    let overrides = CliConfigOverrides {
        weights: args.weights.as_deref().map(parse_weights).transpose()?,
        grid_size_meters: args
            .grid_size
            .as_deref()
            .map(|s| parse_meters("grid_size_meters", s))
            .transpose()?,
        water_proximity_meters: args
            .water_threshold
            .as_deref()
            .map(|s| parse_meters("water_proximity_meters", s))
            .transpose()?,
    };
    let config = load_config_with_overrides(config_file, overrides)?;
    let weights = config.weights();
    let settings = config.settings();

    let issues = load_issues(&args.issues)?;
    let waterways = load_waterways(&args.waterways)?;

    if weights.is_degenerate() {
        output.warning("All criteria weights are zero; no zone can score above zero");
    }

    let mut pipeline = ZonePipeline::new();
    let mut zones = pipeline.zones(&issues, &waterways, &weights, &settings);
    if let Some(limit) = args.limit {
        zones.truncate(limit);
    }

    if output.is_json() {
        return output.result(ZonesOutput {
            weights,
            settings,
            issue_count: issues.len(),
            waterway_count: waterways.len(),
            zones,
        });
    }

    if zones.is_empty() {
        output.info("No priority zones found for these issues");
        return Ok(());
    }

    output.section("Priority Zones");
    output.table(zones.iter().enumerate().map(|(i, z)| ZoneRow::new(i + 1, z)).collect());

    output.section("Summary");
    output.kv("Issues", issues.len());
    output.kv("Waterways", waterways.len());
    output.kv("Grid", format!("{} m", settings.grid_size_meters));
    output.kv("Near water within", format!("{} m", settings.water_proximity_meters));
    for label in [PriorityLabel::Critical, PriorityLabel::High] {
        let count = zones.iter().filter(|z| z.label == label).count();
        output.kv(format!("{} zones", label), count);
    }
    output.info("Scores are relative to this batch: the top zone always scores 1.0");

    Ok(())
}
