//! Merge subcommand
//!
//! Merges YAML or JSON documents left to right into a fresh object.

use super::parse_format;
use crate::config::{OutputConfig, read_layer};
use crate::format::{OutputFormat, render};
use crate::merge::merge_all;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use tracing::debug;

/// Arguments for the merge subcommand
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Recurse into nested objects and arrays instead of replacing them
    #[arg(long)]
    pub deep: bool,

    /// Output format: json or yaml (default from config)
    #[arg(short, long, value_name = "FORMAT", value_parser = parse_format)]
    pub format: Option<OutputFormat>,

    /// Files to merge; later files win
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,
}

/// Read every file and merge them in order.
pub fn run_merge(args: &MergeArgs, output: &OutputConfig) -> Result<String> {
    let layers = args
        .files
        .iter()
        .map(|path| read_layer(path))
        .collect::<Result<Vec<_>>>()?;

    debug!(files = layers.len(), deep = args.deep, "Merging files");
    let merged = merge_all(args.deep, &layers);
    render(&merged, args.format.unwrap_or(output.format), output.pretty)
}
