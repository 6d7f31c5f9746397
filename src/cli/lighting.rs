//! Lighting subcommand

use crate::lighting::{LightingMode, LightingRequest, next_state};
use clap::Args;

/// Arguments for the lighting subcommand
#[derive(Args, Debug)]
pub struct LightingArgs {
    /// Mode the host is in now (default from config)
    #[arg(long, value_name = "MODE")]
    pub current: Option<LightingMode>,

    /// Requested mode: day, night, or toggle
    #[arg(long, value_name = "REQUEST")]
    pub request: LightingRequest,
}

pub fn run_lighting(args: &LightingArgs, initial: LightingMode) -> String {
    let current = args.current.unwrap_or(initial);
    let next = next_state(current, args.request);
    if next == current {
        format!("{} (unchanged)", next)
    } else {
        next.to_string()
    }
}
