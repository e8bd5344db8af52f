use std::path::PathBuf;

use clap::Parser;

/// OneAI: several AI chat apps side by side, one prompt to all of them.
#[derive(Parser, Debug)]
#[command(name = "oneai", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (debug, info, warn, error) or a full filter directive.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Ignore the saved workspace and start from the default layout.
    #[arg(long)]
    pub reset_workspace: bool,

    /// Workspace storage file override.
    #[arg(long)]
    pub storage: Option<PathBuf>,
}

pub fn parse() -> Args {
    Args::parse()
}

/// Turn a bare level into a directive scoped to our crates; pass anything
/// else through as a filter directive.
pub fn log_directive(level: &str) -> String {
    match level.trim().to_ascii_lowercase().as_str() {
        lvl @ ("trace" | "debug" | "info" | "warn" | "error") => format!("oneai={lvl}"),
        "warning" => "oneai=warn".to_string(),
        _ => level.trim().to_string(),
    }
}
