//! Build subcommand
//!
//! Resolves a single object's options the way a scene plan would.

use super::parse_format;
use crate::config::{Config, read_layer};
use crate::format::{OutputFormat, render};
use crate::options::{OptionKind, OptionsBuilder};
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the build subcommand
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Object kind: poi, line, polygon, or model
    #[arg(value_name = "KIND")]
    pub kind: OptionKind,

    /// YAML or JSON file holding the caller's options
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output format: json or yaml (default from config)
    #[arg(short, long, value_name = "FORMAT", value_parser = parse_format)]
    pub format: Option<OutputFormat>,
}

pub fn run_build(args: &BuildArgs, config: &Config) -> Result<String> {
    let input = read_layer(&args.file)?;
    let builder = OptionsBuilder::new(config.defaults.clone());
    let object = builder
        .build(args.kind, &input)
        .with_context(|| format!("Invalid {} options in {}", args.kind, args.file.display()))?;
    render(
        &object,
        args.format.unwrap_or(config.output.format),
        config.output.pretty,
    )
}
