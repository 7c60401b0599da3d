//! Per-scenario results and the suite summary

use std::fmt;
use std::path::PathBuf;

use colored::Colorize;

use super::invoker::ExitOutcome;

/// What happened when a scenario ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioOutcome {
    /// The runner exited with code 0
    Passed,
    /// The runner started but exited nonzero or was killed
    Failed(ExitOutcome),
    /// The runner could not be started at all
    LaunchFailed(String),
}

impl ScenarioOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, ScenarioOutcome::Passed)
    }
}

impl fmt::Display for ScenarioOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioOutcome::Passed => write!(f, "passed"),
            ScenarioOutcome::Failed(exit) => write!(f, "failed ({})", exit),
            ScenarioOutcome::LaunchFailed(reason) => write!(f, "launch failed: {}", reason),
        }
    }
}

/// Result of running one scenario
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    pub name: String,
    pub fixture: PathBuf,
    pub outcome: ScenarioOutcome,
}

impl ScenarioResult {
    pub fn passed(&self) -> bool {
        self.outcome.is_passed()
    }
}

/// Results for every scenario attempted in a run, in execution order
#[derive(Debug, Clone, Default)]
pub struct SuiteReport {
    pub results: Vec<ScenarioResult>,
}

impl SuiteReport {
    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.passed()).count()
    }

    /// Results that did not pass, including launch failures
    pub fn failures(&self) -> impl Iterator<Item = &ScenarioResult> {
        self.results.iter().filter(|r| !r.passed())
    }

    pub fn all_passed(&self) -> bool {
        self.results.iter().all(ScenarioResult::passed)
    }

    pub fn get(&self, name: &str) -> Option<&ScenarioResult> {
        self.results.iter().find(|r| r.name == name)
    }

    /// Print the per-scenario table and totals
    pub fn print_summary(&self) {
        println!("\n{}", "Summary:".cyan());
        for result in &self.results {
            match &result.outcome {
                ScenarioOutcome::Passed => {
                    println!("  {} {}", "✓".green(), result.name);
                }
                ScenarioOutcome::Failed(exit) => {
                    println!("  {} {} ({})", "✗".red(), result.name, exit.to_string().dimmed());
                }
                ScenarioOutcome::LaunchFailed(reason) => {
                    println!(
                        "  {} {} {}",
                        "!".yellow().bold(),
                        result.name,
                        format!("runner did not start: {}", reason).dimmed()
                    );
                }
            }
        }

        let total = self.results.len();
        let passed = self.passed_count();
        let line = format!("{} of {} scenarios passed", passed, total);
        if self.all_passed() {
            println!("\n{}\n", line.green().bold());
        } else {
            println!("\n{}\n", line.red().bold());
        }
    }
}
