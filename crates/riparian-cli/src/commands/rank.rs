//! Rank command implementation

use crate::cli::RankArgs;
use crate::input::load_issues;
use crate::output::OutputWriter;
use crate::output_types::{RankOutput, RankRow};
use anyhow::{bail, Result};
use riparian_core::models::GeoPoint;
use riparian_geo::{rank_by_proximity, SortStrategy};

pub fn execute(args: RankArgs, output: &OutputWriter) -> Result<()> {
    let reference = GeoPoint::new(args.lat, args.lon);
    if !reference.is_valid() {
        bail!("Invalid reference location ({}, {})", args.lat, args.lon);
    }

    let issues = load_issues(&args.issues)?;
    let sort = SortStrategy::from(args.sort);

    let mut ranked = rank_by_proximity(reference, &issues, sort);
    if let Some(limit) = args.limit {
        ranked.truncate(limit);
    }

    if output.is_json() {
        return output.result(RankOutput { reference, sort, issues: ranked });
    }

    if ranked.is_empty() {
        output.info("No issues to rank");
        return Ok(());
    }

    output.section(format!("Issues near {:.5}, {:.5}", reference.lat, reference.lon));
    output.table(ranked.iter().map(RankRow::from).collect());

    Ok(())
}
