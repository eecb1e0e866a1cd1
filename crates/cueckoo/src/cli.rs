//! CLI definition.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Release log and trybot helpers for a Gerrit-first project mirrored on GitHub.
#[derive(Debug, Parser)]
#[command(name = "cueckoo")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a GitHub release log
    #[command(long_about = commands::releaselog::LONG_ABOUT)]
    Releaselog(commands::releaselog::ReleaselogArgs),

    /// Run the trybot (and unity) on pending changes
    #[command(long_about = commands::runtrybot::LONG_ABOUT)]
    Runtrybot(commands::runtrybot::RuntrybotArgs),
}

impl Cli {
    /// Runs the CLI command.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Releaselog(args) => commands::releaselog::run(&args),
            Commands::Runtrybot(args) => commands::runtrybot::run(&args),
        }
    }
}
