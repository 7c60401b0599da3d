//! kv-harness - functional tests for an external key-value runner
//!
//! This library materialises predefined command scenarios as fixture files
//! and runs an external runner executable once per scenario, judging each
//! run by its exit status.

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod common;
pub mod driver;
pub mod fixture;

// Re-export commonly used types for tests
pub use catalog::{Catalog, Command, Scenario};
pub use common::{Error, Result};
pub use driver::{Driver, ExitOutcome, ProcessRunner, RunnerInvoker, ScenarioOutcome, SuiteReport};
pub use fixture::{Encoding, Fixture, FixtureGenerator};
