//! Configuration file handling

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::paths::{config_path, is_bare_program_name};
use super::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// External runner settings
    #[serde(default)]
    pub runner: RunnerConfig,

    /// Fixture generation settings
    #[serde(default)]
    pub fixtures: FixturesConfig,
}

/// Configuration for the external runner executable
#[derive(Debug, Deserialize, Clone)]
pub struct RunnerConfig {
    /// Path to the runner executable
    #[serde(default = "default_runner_path")]
    pub path: PathBuf,

    /// Let the runner write to the harness's stdout/stderr
    #[serde(default = "default_inherit_output")]
    pub inherit_output: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            path: default_runner_path(),
            inherit_output: default_inherit_output(),
        }
    }
}

fn default_runner_path() -> PathBuf {
    PathBuf::from("bin/qredis-runner")
}

fn default_inherit_output() -> bool {
    true
}

/// Fixture generation settings
#[derive(Debug, Deserialize, Clone)]
pub struct FixturesConfig {
    /// Directory fixture files are written to
    #[serde(default = "default_fixtures_dir")]
    pub dir: PathBuf,

    /// Scenario names encoded as raw token streams instead of JSON
    #[serde(default)]
    pub raw_scenarios: Vec<String>,
}

impl Default for FixturesConfig {
    fn default() -> Self {
        Self {
            dir: default_fixtures_dir(),
            raw_scenarios: Vec::new(),
        }
    }
}

fn default_fixtures_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Config {
    /// Load configuration from `explicit`, or from the default config file
    ///
    /// Returns default configuration if no explicit path is given and the
    /// default file doesn't exist. An explicit path must exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => match config_path() {
                Some(path) if path.exists() => Self::load_from(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| super::Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| super::Error::ConfigParse(e.to_string()))
    }
}

impl RunnerConfig {
    /// Resolve the runner path
    ///
    /// Falls back to searching PATH for bare program names that don't
    /// exist relative to the working directory. Unresolvable paths are
    /// returned unchanged so the launch failure is reported per scenario.
    pub fn resolve_path(&self) -> PathBuf {
        self.resolve_path_from(Path::new("."))
    }

    /// Resolve the runner path as if `base` were the working directory
    ///
    /// A bare name found in `base` is returned as `./<name>`, since process
    /// spawning searches PATH for bare names.
    pub fn resolve_path_from(&self, base: &Path) -> PathBuf {
        if !is_bare_program_name(&self.path) {
            return self.path.clone();
        }
        if base.join(&self.path).exists() {
            return Path::new(".").join(&self.path);
        }

        match which::which(&self.path) {
            Ok(found) => {
                tracing::debug!(runner = %found.display(), "Resolved runner on PATH");
                found
            }
            Err(_) => self.path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.runner.path, PathBuf::from("bin/qredis-runner"));
        assert!(config.runner.inherit_output);
        assert_eq!(config.fixtures.dir, PathBuf::from("."));
        assert!(config.fixtures.raw_scenarios.is_empty());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_toml(
            r#"
[fixtures]
raw_scenarios = ["simple_ping_test"]
"#,
        )
        .unwrap();
        assert_eq!(config.fixtures.raw_scenarios, vec!["simple_ping_test"]);
        assert_eq!(config.fixtures.dir, PathBuf::from("."));
        assert_eq!(config.runner.path, PathBuf::from("bin/qredis-runner"));
    }

    #[test]
    fn test_full_file() {
        let config = Config::from_toml(
            r#"
[runner]
path = "/opt/runner/bin/redis-runner"
inherit_output = false

[fixtures]
dir = "/tmp/fixtures"
"#,
        )
        .unwrap();
        assert_eq!(config.runner.path, PathBuf::from("/opt/runner/bin/redis-runner"));
        assert!(!config.runner.inherit_output);
        assert_eq!(config.fixtures.dir, PathBuf::from("/tmp/fixtures"));
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::from_toml("[runner\npath = 1").unwrap_err();
        assert!(matches!(err, super::super::Error::ConfigParse(_)));
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/nonexistent/kv-harness.toml"))).unwrap_err();
        assert!(matches!(err, super::super::Error::FileRead { .. }));
    }

    #[test]
    fn test_unresolvable_runner_is_unchanged() {
        let runner = RunnerConfig {
            path: PathBuf::from("kv-harness-no-such-runner"),
            inherit_output: true,
        };
        assert_eq!(runner.resolve_path(), PathBuf::from("kv-harness-no-such-runner"));
    }

    #[test]
    fn test_bare_runner_in_working_dir_wins_over_path() {
        let dir = tempfile::tempdir().unwrap();
        // `sh` is also on PATH; the local file must take precedence.
        std::fs::write(dir.path().join("sh"), "exit 0\n").unwrap();

        let runner = RunnerConfig {
            path: PathBuf::from("sh"),
            inherit_output: true,
        };
        assert_eq!(runner.resolve_path_from(dir.path()), Path::new(".").join("sh"));
    }

    #[test]
    fn test_paths_with_directories_are_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let runner = RunnerConfig {
            path: PathBuf::from("bin/qredis-runner"),
            inherit_output: true,
        };
        assert_eq!(runner.resolve_path_from(dir.path()), PathBuf::from("bin/qredis-runner"));
    }
}
