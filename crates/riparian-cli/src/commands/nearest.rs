//! Nearest command implementation

use crate::cli::NearestArgs;
use crate::input::{load_issues, load_waterways};
use crate::output::OutputWriter;
use crate::output_types::{NearestOutput, NearestRow};
use anyhow::Result;
use riparian_geo::nearest::nearest_in_index;
use riparian_geo::WaterwayIndex;

pub fn execute(args: NearestArgs, output: &OutputWriter) -> Result<()> {
    let issues = load_issues(&args.issues)?;
    let waterways = load_waterways(&args.waterways)?;

    let index = WaterwayIndex::build(&waterways);
    if index.is_empty() && !issues.is_empty() {
        output.warning("No usable waterway geometry; nothing to measure against");
    }

    let results = nearest_in_index(&issues, &index);

    if output.is_json() {
        return output.result(NearestOutput {
            issue_count: issues.len(),
            skipped_waterways: index.skipped().to_vec(),
            results,
        });
    }

    if results.is_empty() {
        output.info("No issues could be matched to a waterway");
        return Ok(());
    }

    output.section("Nearest Waterways");
    let rows: Vec<NearestRow> = results
        .values()
        .map(|r| NearestRow {
            issue_id: r.issue_id.clone(),
            waterway: r.waterway_name.clone(),
            distance: format!("{:.0}", r.distance_feet),
        })
        .collect();
    output.table(rows);

    let unmatched = issues.len().saturating_sub(results.len());
    if unmatched > 0 {
        output.info(format!("{} issue(s) without a result (invalid location or duplicate id)", unmatched));
    }
    if !index.skipped().is_empty() {
        output.warning(format!("Skipped malformed waterways: {}", index.skipped().join(", ")));
    }

    Ok(())
}
