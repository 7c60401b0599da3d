//! Command dispatch
//!
//! Merges the configuration file with command-line flags and runs the
//! requested command.

use std::path::PathBuf;

use colored::Colorize;

use crate::catalog::Catalog;
use crate::commands::{Commands, HarnessOptions};
use crate::common::config::Config;
use crate::common::Result;
use crate::driver::{Driver, ProcessRunner};
use crate::fixture::FixtureGenerator;

/// Effective settings after applying flags over the config file
#[derive(Debug)]
pub struct Settings {
    pub runner: PathBuf,
    pub inherit_output: bool,
    pub fixtures: FixtureGenerator,
}

impl Settings {
    pub fn resolve(config: Config, options: &HarnessOptions) -> Self {
        let mut runner_config = config.runner;
        if let Some(path) = &options.runner {
            runner_config.path = path.clone();
        }

        let dir = options
            .fixtures_dir
            .clone()
            .unwrap_or(config.fixtures.dir);
        let fixtures = FixtureGenerator::new(dir)
            .with_raw_scenarios(config.fixtures.raw_scenarios)
            .with_raw_scenarios(options.raw_scenarios.iter().cloned());

        Self {
            runner: runner_config.resolve_path(),
            inherit_output: runner_config.inherit_output && !options.quiet,
            fixtures,
        }
    }
}

/// Load the catalog named by `--catalog`, or the built-in one
pub fn load_catalog(options: &HarnessOptions) -> Result<Catalog> {
    match &options.catalog {
        Some(path) => Catalog::load_yaml(path),
        None => Ok(Catalog::builtin()),
    }
}

/// Dispatch a CLI command
///
/// Returns whether every executed scenario passed.
pub async fn dispatch(command: Commands, options: &HarnessOptions) -> Result<bool> {
    let config = Config::load(options.config.as_deref())?;
    let settings = Settings::resolve(config, options);
    let catalog = load_catalog(options)?;

    for name in settings.fixtures.unmatched_raw_scenarios(&catalog) {
        tracing::warn!(scenario = name, "Raw encoding requested for unknown scenario");
    }

    match command {
        Commands::Run { scenarios } => {
            let runner = ProcessRunner::new(&settings.runner).inherit_output(settings.inherit_output);
            tracing::info!(runner = %runner.program().display(), "Using runner");
            let driver = Driver::new(&catalog, &settings.fixtures, runner);

            let report = if scenarios.is_empty() {
                driver.run_all().await?
            } else {
                driver.run_selected(&scenarios).await?
            };

            report.print_summary();
            Ok(report.all_passed())
        }

        Commands::Generate => {
            let fixtures = settings.fixtures.generate_all(&catalog)?;
            for fixture in &fixtures {
                println!(
                    "  {} {} {}",
                    "✓".green(),
                    fixture.scenario,
                    fixture.path.display().to_string().dimmed()
                );
            }
            Ok(true)
        }

        Commands::List => {
            for scenario in catalog.iter() {
                println!(
                    "{}  {} commands, {}",
                    scenario.name().white().bold(),
                    scenario.commands().len(),
                    settings.fixtures.encoding_for(scenario.name())
                );
            }
            Ok(true)
        }
    }
}
