//! kv-harness - functional tests for an external key-value runner
//!
//! Generates scenario fixtures and runs the runner executable once per
//! scenario. Exits 0 only if every scenario's runner exited 0.

use clap::Parser;
use kv_harness::commands::{Commands, HarnessOptions};
use kv_harness::{cli, common::logging};

#[derive(Parser)]
#[command(name = "kv-harness", about = "Functional-test harness for a key-value runner")]
#[command(version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    options: HarnessOptions,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    logging::init_cli();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or_default();

    match cli::dispatch(command, &cli.options).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
