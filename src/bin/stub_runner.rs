//! Stub runner binary for integration testing
//!
//! Stands in for the real key-value runner: decodes the fixture named by
//! its only argument and exits with a configurable code, so the harness
//! can be exercised without a server.
//!
//! Environment:
//! - `STUB_RUNNER_EXIT_CODE`: code to exit with after a successful decode (default 0)
//! - `STUB_RUNNER_EXPECT_COMMANDS`: if set, exit 3 unless the fixture holds
//!   exactly this many commands

use std::path::PathBuf;
use std::process::ExitCode;

use kv_harness::fixture::decode_file;

fn main() -> ExitCode {
    let mut args = std::env::args_os().skip(1);
    let path = match (args.next(), args.next()) {
        (Some(path), None) => PathBuf::from(path),
        _ => {
            eprintln!("usage: stub-runner <fixture-path>");
            return ExitCode::from(2);
        }
    };

    let commands = match decode_file(&path) {
        Ok(commands) => commands,
        Err(e) => {
            eprintln!("stub-runner: {e}");
            return ExitCode::from(2);
        }
    };

    if let Some(expected) = env_number("STUB_RUNNER_EXPECT_COMMANDS") {
        if commands.len() as u64 != expected {
            eprintln!(
                "stub-runner: expected {} commands, fixture has {}",
                expected,
                commands.len()
            );
            return ExitCode::from(3);
        }
    }

    println!("stub-runner: {} commands from {}", commands.len(), path.display());

    let code = env_number("STUB_RUNNER_EXIT_CODE").unwrap_or(0);
    ExitCode::from(u8::try_from(code).unwrap_or(u8::MAX))
}

fn env_number(key: &str) -> Option<u64> {
    std::env::var(key).ok()?.trim().parse().ok()
}
