//! Error types for the harness
//!
//! Fixture errors are fatal to a whole run. Runner launch errors are kept
//! separate so the driver can report them apart from a runner that started
//! and exited with a failing status.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the harness
#[derive(Error, Debug)]
pub enum Error {
    // === Fixture Errors ===
    #[error("Failed to write fixture '{}': {source}", .path.display())]
    FixtureWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read fixture '{}': {source}", .path.display())]
    FixtureRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot decode fixture '{}': {message}", .path.display())]
    FixtureDecode { path: PathBuf, message: String },

    #[error("Scenario name {0:?} cannot be used as a fixture file name")]
    InvalidScenarioName(String),

    // === Catalog Errors ===
    #[error("Unknown scenario '{0}'. Use 'kv-harness list' to see available scenarios")]
    UnknownScenario(String),

    #[error("Invalid scenario catalog: {0}")]
    CatalogParse(String),

    // === Runner Errors ===
    #[error("Failed to launch runner '{}': {source}", .program.display())]
    RunnerLaunch {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    // === Configuration Errors ===
    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a fixture write error for `path`
    pub fn fixture_write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FixtureWrite {
            path: path.into(),
            source,
        }
    }

    /// Create a fixture decode error for `path`
    pub fn fixture_decode(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::FixtureDecode {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether this error means the runner never started
    pub fn is_launch_failure(&self) -> bool {
        matches!(self, Self::RunnerLaunch { .. })
    }
}
