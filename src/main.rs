use std::path::PathBuf;

use clap::Parser;

mod commands;
mod gate;
mod sonar;

use anyhow::Result;
use commands::check::CheckCommand;
use dirs::{home_dir, state_dir};

/// Get the state directory path using XDG Base Directory specification
/// Used for log files
pub fn get_state_dir() -> Option<PathBuf> {
    state_dir()
        .or_else(|| home_dir().map(|home| home.join(".local").join("state")))
        .map(|dir| dir.join("sonar-qualitygate"))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let app = CheckCommand::parse();
    let outcome = app.run().await?;
    std::process::exit(outcome.exit_code());
}
