//! CLI command definitions for scene-compose
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.
//! Each subcommand's `run_*` function returns the rendered output.

pub mod build;
pub mod lighting;
pub mod merge;
pub mod plan;

use crate::format::OutputFormat;
use build::BuildArgs;
use clap::{Parser, Subcommand};
use lighting::LightingArgs;
use merge::MergeArgs;
use plan::PlanArgs;
use std::path::PathBuf;

/// Compose scene object options and replay scene plans
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (replaces project and user config)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Merge YAML or JSON files left to right
    Merge(MergeArgs),

    /// Resolve one object's options against configured defaults
    Build(BuildArgs),

    /// Apply a scene plan against a dry-run host
    Plan(PlanArgs),

    /// Compute the lighting mode that follows a request
    Lighting(LightingArgs),
}

/// clap value parser for `--format`.
pub(crate) fn parse_format(s: &str) -> Result<OutputFormat, String> {
    OutputFormat::from_str(s)
        .ok_or_else(|| format!("Invalid format '{}'. Valid options: json, yaml", s))
}
