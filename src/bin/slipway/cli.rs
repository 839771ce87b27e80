//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Slipway - a declarative meta-build configuration engine
#[derive(Parser)]
#[command(name = "slipway")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load, expand, resolve, and validate a project
    Check(CheckArgs),

    /// Display the resolved module tree
    Tree(TreeArgs),

    /// Execute a plan file through the scheduler
    Exec(ExecArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct CheckArgs {
    /// Root document to load
    pub document: PathBuf,

    /// Feature flags to answer yes to in templates
    #[arg(long = "enable", value_name = "FLAG")]
    pub enable: Vec<String>,
}

#[derive(Args)]
pub struct TreeArgs {
    /// Root document to load
    pub document: PathBuf,

    /// Feature flags to answer yes to in templates
    #[arg(long = "enable", value_name = "FLAG")]
    pub enable: Vec<String>,

    /// Show each module's requirements
    #[arg(long)]
    pub requirements: bool,
}

#[derive(Args)]
pub struct ExecArgs {
    /// Plan file to execute
    pub plan: PathBuf,

    /// Number of parallel jobs
    #[arg(short, long)]
    pub jobs: Option<usize>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
