//! CLI command definitions
//!
//! Defines the clap commands for the harness CLI.

use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate fixtures, then run scenarios against the runner (default)
    Run {
        /// Scenarios to run (default: every scenario in the catalog)
        scenarios: Vec<String>,
    },

    /// Write fixture files without running anything
    Generate,

    /// List scenarios with their command counts and fixture encoding
    #[command(alias = "ls")]
    List,
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Run {
            scenarios: Vec::new(),
        }
    }
}

/// Options shared by every command
///
/// Flags override the configuration file.
#[derive(Args, Debug, Default)]
pub struct HarnessOptions {
    /// Path to the runner executable (default: bin/qredis-runner)
    #[arg(long, global = true)]
    pub runner: Option<PathBuf>,

    /// Directory fixture files are written to (default: current directory)
    #[arg(long, global = true)]
    pub fixtures_dir: Option<PathBuf>,

    /// Encode this scenario as a raw token stream instead of JSON
    /// Can be specified multiple times: --raw simple_ping_test --raw simple_incr_test
    #[arg(long = "raw", global = true)]
    pub raw_scenarios: Vec<String>,

    /// Load scenarios from a YAML catalog instead of the built-in set
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Configuration file (default: platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Discard the runner's stdout/stderr
    #[arg(long, short, global = true)]
    pub quiet: bool,
}
