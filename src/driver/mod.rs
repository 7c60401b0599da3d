//! Execution driver
//!
//! Generates every fixture once, then runs the external program against
//! each scenario in turn. A failing scenario is recorded and the run moves
//! on; only fixture generation errors abort the whole run.

mod invoker;
mod report;

pub use invoker::{ExitOutcome, ProcessRunner, RunnerInvoker};
pub use report::{ScenarioOutcome, ScenarioResult, SuiteReport};

use colored::Colorize;

use crate::catalog::Catalog;
use crate::common::{Error, Result};
use crate::fixture::FixtureGenerator;

/// Runs catalog scenarios against a runner
pub struct Driver<'a, R> {
    catalog: &'a Catalog,
    fixtures: &'a FixtureGenerator,
    runner: R,
}

impl<'a, R: RunnerInvoker> Driver<'a, R> {
    pub fn new(catalog: &'a Catalog, fixtures: &'a FixtureGenerator, runner: R) -> Self {
        Self {
            catalog,
            fixtures,
            runner,
        }
    }

    /// Generate all fixtures, then run every scenario in the catalog
    pub async fn run_all(&self) -> Result<SuiteReport> {
        let names: Vec<String> = self.catalog.names().map(str::to_string).collect();
        self.run_selected(&names).await
    }

    /// Generate all fixtures, then run the named scenarios in the given order
    ///
    /// Unknown names are rejected before any fixture is written.
    pub async fn run_selected<S: AsRef<str>>(&self, names: &[S]) -> Result<SuiteReport> {
        if let Some(unknown) = names.iter().find(|n| !self.catalog.contains(n.as_ref())) {
            return Err(Error::UnknownScenario(unknown.as_ref().to_string()));
        }

        self.fixtures.generate_all(self.catalog)?;

        let mut report = SuiteReport::default();
        for name in names {
            report.results.push(self.run_scenario(name.as_ref()).await?);
        }

        tracing::info!(
            total = report.results.len(),
            passed = report.passed_count(),
            "Run finished"
        );
        Ok(report)
    }

    /// Run one scenario against its already generated fixture
    pub async fn run_scenario(&self, name: &str) -> Result<ScenarioResult> {
        if !self.catalog.contains(name) {
            return Err(Error::UnknownScenario(name.to_string()));
        }

        let fixture = self.fixtures.path_for(name);
        println!("\n{} {}", "Running Scenario:".blue().bold(), name.white().bold());
        tracing::info!(scenario = name, fixture = %fixture.display(), "Running scenario");

        let outcome = match self.runner.invoke(&fixture).await {
            Ok(exit) if exit.success() => ScenarioOutcome::Passed,
            Ok(exit) => ScenarioOutcome::Failed(exit),
            Err(e) if e.is_launch_failure() => ScenarioOutcome::LaunchFailed(e.to_string()),
            Err(e) => return Err(e),
        };

        match &outcome {
            ScenarioOutcome::Passed => println!("  {} {}", "✓".green(), "Passed".green()),
            ScenarioOutcome::Failed(exit) => {
                tracing::warn!(scenario = name, %exit, "Scenario failed");
                println!("  {} Failed: {}", "✗".red(), exit);
            }
            ScenarioOutcome::LaunchFailed(reason) => {
                tracing::warn!(scenario = name, reason = %reason, "Runner did not start");
                println!("  {} {}", "!".yellow().bold(), reason);
            }
        }

        Ok(ScenarioResult {
            name: name.to_string(),
            fixture,
            outcome,
        })
    }
}
