//! Plan subcommand
//!
//! Applies a scene plan against a [`DryRunHost`] and reports what the host
//! would have been asked to do.

use super::parse_format;
use crate::config::Config;
use crate::follow::NodePathRegistry;
use crate::format::{OutputFormat, render};
use crate::host::{DryRunHost, HostCall};
use crate::options::OptionsBuilder;
use crate::scene::{SceneReport, ScenePlan, apply_scene};
use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the plan subcommand
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Scene plan file (YAML or JSON)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output format: json or yaml (default from config)
    #[arg(short, long, value_name = "FORMAT", value_parser = parse_format)]
    pub format: Option<OutputFormat>,
}

/// Rendered result of a dry run.
#[derive(Debug, Serialize)]
pub struct PlanOutput {
    pub report: SceneReport,
    pub calls: Vec<HostCall>,
}

/// Apply the plan in `args.file` and return the report and host call log.
pub async fn run_plan(args: &PlanArgs, config: &Config) -> Result<PlanOutput> {
    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let plan = ScenePlan::from_yaml(&text)
        .with_context(|| format!("Failed to parse scene plan {}", args.file.display()))?;

    let host = Arc::new(DryRunHost::new());
    let builder = OptionsBuilder::new(config.defaults.clone());
    let mut registry = NodePathRegistry::new();
    let mut lighting = config.lighting.initial;

    let report = apply_scene(host.clone(), &builder, &mut registry, &mut lighting, &plan)
        .await
        .with_context(|| format!("Scene plan {} failed", args.file.display()))?;

    Ok(PlanOutput {
        report,
        calls: host.calls(),
    })
}

/// Render a [`PlanOutput`] using the requested or configured format.
pub fn render_plan(output: &PlanOutput, args: &PlanArgs, config: &Config) -> Result<String> {
    render(
        output,
        args.format.unwrap_or(config.output.format),
        config.output.pretty,
    )
}
