//! Fixture generation
//!
//! Writes one file per catalog scenario for the runner to read. Files are
//! created or truncated on every generation and nothing else on disk is
//! touched, so regenerating from the same catalog yields identical bytes.

mod codec;

pub use codec::{
    decode_file, decode_raw, decode_structured, encode, encode_raw, encode_structured, Encoding,
    DATA_SEPARATOR,
};

use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Component, Path, PathBuf};

use crate::catalog::{Catalog, Scenario};
use crate::common::{Error, Result};

/// A materialised fixture file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    pub scenario: String,
    pub path: PathBuf,
    pub encoding: Encoding,
}

/// Writes fixtures into a directory
///
/// Scenarios use the structured encoding unless their name is in the raw
/// set, which is empty by default.
#[derive(Debug, Clone)]
pub struct FixtureGenerator {
    dir: PathBuf,
    raw_scenarios: BTreeSet<String>,
}

impl FixtureGenerator {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            raw_scenarios: BTreeSet::new(),
        }
    }

    /// Designate scenarios that use the raw token-stream encoding
    pub fn with_raw_scenarios<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.raw_scenarios.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn encoding_for(&self, name: &str) -> Encoding {
        if self.raw_scenarios.contains(name) {
            Encoding::Raw
        } else {
            Encoding::Structured
        }
    }

    /// Fixture path for a scenario name: `<dir>/<name>.<ext>`
    pub fn path_for(&self, name: &str) -> PathBuf {
        let encoding = self.encoding_for(name);
        self.dir.join(format!("{}.{}", name, encoding.extension()))
    }

    /// Raw designations that name no scenario in `catalog`
    pub fn unmatched_raw_scenarios<'a>(
        &'a self,
        catalog: &'a Catalog,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.raw_scenarios
            .iter()
            .map(String::as_str)
            .filter(move |name| !catalog.contains(name))
    }

    /// Write the fixture for one scenario
    ///
    /// Fails with [`Error::InvalidScenarioName`] before touching the disk
    /// if the name is not a single plain file name.
    pub fn generate(&self, scenario: &Scenario) -> Result<Fixture> {
        check_scenario_name(scenario.name())?;
        let encoding = self.encoding_for(scenario.name());
        let path = self.path_for(scenario.name());

        let file = File::create(&path).map_err(|e| Error::fixture_write(&path, e))?;
        let mut writer = BufWriter::new(file);

        encode(&mut writer, encoding, scenario.commands()).map_err(|e| match e {
            Error::Io(source) => Error::fixture_write(&path, source),
            Error::Json(json) => Error::fixture_write(&path, json.into()),
            other => other,
        })?;
        writer.flush().map_err(|e| Error::fixture_write(&path, e))?;

        tracing::debug!(
            scenario = scenario.name(),
            path = %path.display(),
            %encoding,
            commands = scenario.commands().len(),
            "Wrote fixture"
        );

        Ok(Fixture {
            scenario: scenario.name().to_string(),
            path,
            encoding,
        })
    }

    /// Write fixtures for every scenario in the catalog
    ///
    /// Stops at the first write failure; a partially generated set must
    /// not be run against.
    pub fn generate_all(&self, catalog: &Catalog) -> Result<Vec<Fixture>> {
        let fixtures = catalog
            .iter()
            .map(|scenario| self.generate(scenario))
            .collect::<Result<Vec<_>>>()?;

        tracing::info!(
            count = fixtures.len(),
            dir = %self.dir.display(),
            "Generated fixtures"
        );
        Ok(fixtures)
    }
}

/// A scenario name must be exactly one normal path component
fn check_scenario_name(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) if part == OsStr::new(name) => Ok(()),
        _ => Err(Error::InvalidScenarioName(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Command;

    #[test]
    fn test_default_encoding_is_structured() {
        let generator = FixtureGenerator::new("out");
        assert_eq!(generator.encoding_for("simple_ping_test"), Encoding::Structured);
        assert_eq!(
            generator.path_for("simple_ping_test"),
            Path::new("out").join("simple_ping_test.json")
        );
    }

    #[test]
    fn test_raw_designation() {
        let generator = FixtureGenerator::new("out").with_raw_scenarios(["legacy"]);
        assert_eq!(generator.encoding_for("legacy"), Encoding::Raw);
        assert_eq!(generator.path_for("legacy"), Path::new("out").join("legacy.data"));
        assert_eq!(generator.encoding_for("other"), Encoding::Structured);
    }

    #[test]
    fn test_names_outside_fixture_dir_rejected() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("fixtures");
        std::fs::create_dir(&dir).unwrap();
        let generator = FixtureGenerator::new(&dir);

        for name in ["../escaped", "a/b", "", ".", "..", "/abs", "trailing/"] {
            let scenario = Scenario::new(name, vec![Command::new(["PING"])]);
            let err = generator.generate(&scenario).unwrap_err();
            assert!(
                matches!(&err, Error::InvalidScenarioName(n) if n == name),
                "{name:?}: {err:?}"
            );
        }

        assert!(!root.path().join("escaped.json").exists());
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
    }

    #[test]
    fn test_invalid_name_aborts_generate_all() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::from_yaml_str(
            r#"
scenarios:
  - name: "../escaped"
    commands:
      - tokens: [PING]
"#,
        )
        .unwrap();

        let err = FixtureGenerator::new(dir.path())
            .generate_all(&catalog)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidScenarioName(_)));
        assert!(!dir.path().parent().unwrap().join("escaped.json").exists());
    }

    #[test]
    fn test_unmatched_raw_scenarios() {
        let catalog = Catalog::from_scenarios([
            Scenario::new("ping", vec![Command::new(["PING"])]),
            Scenario::new("incr", vec![Command::new(["INCR", "k"])]),
        ]);
        let generator = FixtureGenerator::new("out").with_raw_scenarios(["ping", "pnig"]);

        let unmatched: Vec<&str> = generator.unmatched_raw_scenarios(&catalog).collect();
        assert_eq!(unmatched, vec!["pnig"]);
    }

    #[test]
    fn test_unwritable_dir_reports_path() {
        let generator = FixtureGenerator::new("/nonexistent/kv-harness-fixtures");
        let scenario = Scenario::new("ping", vec![Command::new(["PING"])]);

        let err = generator.generate(&scenario).unwrap_err();
        match err {
            Error::FixtureWrite { path, .. } => {
                assert_eq!(path, Path::new("/nonexistent/kv-harness-fixtures/ping.json"));
            }
            other => panic!("Expected FixtureWrite, got {other:?}"),
        }
    }
}
