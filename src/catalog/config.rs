//! Scenario catalog file types
//!
//! Defines the data structures for deserializing YAML catalogs.

use serde::Deserialize;

use super::{Catalog, Command, Scenario};

/// A complete catalog loaded from a YAML file
#[derive(Deserialize, Debug)]
pub struct CatalogFile {
    /// Scenarios in file order
    pub scenarios: Vec<ScenarioEntry>,
}

/// One scenario in a catalog file
#[derive(Deserialize, Debug)]
pub struct ScenarioEntry {
    /// Unique scenario name, also the fixture file stem
    pub name: String,
    /// Commands in execution order
    #[serde(default)]
    pub commands: Vec<CommandEntry>,
}

/// A command, optionally repeated
#[derive(Deserialize, Debug)]
pub struct CommandEntry {
    /// Operation name followed by operands
    pub tokens: Vec<String>,
    /// Number of consecutive copies (default: 1)
    #[serde(default = "default_repeat")]
    pub repeat: usize,
}

fn default_repeat() -> usize {
    1
}

impl ScenarioEntry {
    fn into_scenario(self) -> Scenario {
        let commands = self
            .commands
            .into_iter()
            .flat_map(|entry| std::iter::repeat(Command::from(entry.tokens)).take(entry.repeat))
            .collect();
        Scenario::new(self.name, commands)
    }
}

impl CatalogFile {
    pub fn into_catalog(self) -> Catalog {
        Catalog::from_scenarios(self.scenarios.into_iter().map(ScenarioEntry::into_scenario))
    }
}
