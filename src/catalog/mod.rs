//! Scenario catalog
//!
//! A read-only mapping from scenario name to the ordered commands sent to
//! the runner. The catalog is built once, then shared by reference with
//! the fixture generator and the driver.

mod config;

pub use config::{CatalogFile, CommandEntry, ScenarioEntry};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::common::{Error, Result};

/// Repetitions used by the built-in throughput scenarios
const REPEATED_COMMANDS: usize = 10_000;

/// Payload chunk and count for `big_data_read_write`
const BIG_VALUE_CHUNK: &str = "super_long_string";
const BIG_VALUE_REPEAT: usize = 3_500_000;

/// One operation sent to the runner
///
/// `tokens()[0]` is the operation name, the rest are operands. Tokens are
/// opaque and passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Command(Vec<String>);

impl Command {
    /// Build a command from its tokens
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(tokens.into_iter().map(Into::into).collect())
    }

    /// All tokens, operation name first
    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    /// The operation name, if the command has any tokens
    pub fn operation(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Operands following the operation name
    pub fn operands(&self) -> &[String] {
        self.0.get(1..).unwrap_or(&[])
    }
}

impl From<Vec<String>> for Command {
    fn from(tokens: Vec<String>) -> Self {
        Self(tokens)
    }
}

/// A named, ordered sequence of commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    name: String,
    commands: Vec<Command>,
}

impl Scenario {
    pub fn new(name: impl Into<String>, commands: Vec<Command>) -> Self {
        Self {
            name: name.into(),
            commands,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }
}

/// Immutable set of scenarios keyed by unique name
///
/// Enumeration is in name order, so it is stable across runs.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    scenarios: BTreeMap<String, Scenario>,
}

impl Catalog {
    /// Build a catalog from scenarios; a later duplicate name replaces
    /// the earlier entry
    pub fn from_scenarios<I>(scenarios: I) -> Self
    where
        I: IntoIterator<Item = Scenario>,
    {
        let scenarios = scenarios
            .into_iter()
            .map(|s| (s.name.clone(), s))
            .collect();
        Self { scenarios }
    }

    /// The scenarios shipped with the harness
    pub fn builtin() -> Self {
        Self::from_scenarios([
            Scenario::new(
                "simple_ping_test",
                vec![Command::new(["PING"]); REPEATED_COMMANDS],
            ),
            Scenario::new(
                "simple_incr_test",
                vec![Command::new(["INCR", "test"]); REPEATED_COMMANDS],
            ),
            Scenario::new(
                "big_data_read_write",
                vec![
                    Command::new([
                        "SET".to_string(),
                        "test".to_string(),
                        BIG_VALUE_CHUNK.repeat(BIG_VALUE_REPEAT),
                    ]),
                    Command::new(["GET", "test"]),
                ],
            ),
        ])
    }

    /// Load a catalog from a YAML file
    pub fn load_yaml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parse a catalog from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let file: CatalogFile =
            serde_yaml::from_str(content).map_err(|e| Error::CatalogParse(e.to_string()))?;
        Ok(file.into_catalog())
    }

    pub fn get(&self, name: &str) -> Option<&Scenario> {
        self.scenarios.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.scenarios.contains_key(name)
    }

    /// All scenarios in name order
    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.values()
    }

    /// All scenario names in name order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.scenarios.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}
