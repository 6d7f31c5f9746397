//! scene-compose
//!
//! Command-line front end for composing scene object options, merging
//! configuration documents, and replaying scene plans against a dry-run host.

use anyhow::Result;
use clap::Parser;
use scene_compose::cli::build::run_build;
use scene_compose::cli::lighting::run_lighting;
use scene_compose::cli::merge::run_merge;
use scene_compose::cli::plan::{render_plan, run_plan};
use scene_compose::cli::{Cli, Command};
use scene_compose::config::{ConfigLoader, ConfigPaths};
use scene_compose::logging::{self, LogTarget};
use tracing::debug;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on --log option
    logging::init(&LogTarget::parse(&cli.log), cli.verbose)?;

    // Load configuration with tier merging; --config replaces the file tiers
    let mut paths = ConfigPaths::discover();
    if let Some(config_path) = &cli.config {
        paths = paths.with_explicit(config_path);
    }
    let loader = ConfigLoader::load_with_paths(paths)?;
    for source in loader.sources() {
        debug!(path = %source.display(), "Using config file");
    }
    let config = loader.into_config();

    let output = match cli.command {
        Command::Merge(args) => run_merge(&args, &config.output)?,
        Command::Build(args) => run_build(&args, &config)?,
        Command::Plan(args) => {
            let result = run_plan(&args, &config).await?;
            render_plan(&result, &args, &config)?
        }
        Command::Lighting(args) => run_lighting(&args, config.lighting.initial),
    };

    println!("{}", output.trim_end());
    Ok(())
}
