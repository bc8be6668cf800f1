//! Command implementations

mod config;
mod nearest;
mod rank;
mod zones;

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;
use anyhow::Result;

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let config_file = cli.config.as_deref();

    match cli.command {
        Commands::Zones(args) => zones::execute(args, config_file, &output),
        Commands::Nearest(args) => nearest::execute(args, &output),
        Commands::Rank(args) => rank::execute(args, &output),
        Commands::Config => config::execute(config_file, &output),
    }
}
