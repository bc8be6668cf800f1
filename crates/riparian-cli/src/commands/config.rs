//! Config command implementation

use crate::config_loader::{config_path, load_config};
use crate::output::OutputWriter;
use crate::output_types::{ConfigEntry, ConfigOutput, ConfigRow};
use anyhow::Result;
use std::collections::BTreeMap;
use std::path::Path;

pub fn execute(config_file: Option<&Path>, output: &OutputWriter) -> Result<()> {
    let config = load_config(config_file)?;
    let file = config_path(config_file).map(|p| p.display().to_string());

    // Sorted by key for consistent output
    let values: BTreeMap<String, ConfigEntry> = config
        .to_inspection_map()
        .into_iter()
        .map(|(key, (value, source))| (key, ConfigEntry { value, source }))
        .collect();

    if output.is_json() {
        return output.result(ConfigOutput { config_file: file, values });
    }

    output.section("Configuration Values");
    output.table(
        values
            .into_iter()
            .map(|(key, entry)| ConfigRow {
                key,
                value: entry.value,
                source: format!("{:?}", entry.source),
            })
            .collect(),
    );

    if let Some(file) = file {
        output.kv("Config file", file);
    }

    let weights = config.weights();
    let out_of_range = weights.out_of_range();
    if !out_of_range.is_empty() {
        output.warning(format!(
            "Weights outside [0, 1] are used unchanged: {}",
            out_of_range.join(", ")
        ));
    }

    output.section("Configuration Precedence");
    output.info("CLI arguments > Environment variables > Config file > Defaults");

    Ok(())
}
