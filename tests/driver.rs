//! End-to-end driver tests against the stub-runner binary
//!
//! The stub decodes each fixture it is given and exits with the code in
//! `STUB_RUNNER_EXIT_CODE`, so these tests exercise real process launches.

use std::path::{Path, PathBuf};

use kv_harness::{
    Catalog, Driver, ExitOutcome, FixtureGenerator, ProcessRunner, ScenarioOutcome,
};

fn stub_runner() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_stub-runner"))
}

fn stub(exit_code: u8) -> ProcessRunner {
    ProcessRunner::new(stub_runner())
        .inherit_output(false)
        .env("STUB_RUNNER_EXIT_CODE", exit_code.to_string())
}

const SMALL_CATALOG: &str = r#"
scenarios:
  - name: ping
    commands:
      - tokens: [PING]
        repeat: 5
  - name: set_get
    commands:
      - tokens: [SET, key, value]
      - tokens: [GET, key]
  - name: incr
    commands:
      - tokens: [INCR, counter]
        repeat: 3
"#;

#[tokio::test]
async fn test_builtin_catalog_passes_against_succeeding_stub() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = Catalog::builtin();
    let fixtures = FixtureGenerator::new(dir.path());

    let report = Driver::new(&catalog, &fixtures, stub(0)).run_all().await.unwrap();

    assert_eq!(report.results.len(), 3);
    assert!(report.all_passed(), "{:?}", report.results);
    for name in catalog.names() {
        assert!(report.get(name).unwrap().passed());
    }
}

#[tokio::test]
async fn test_builtin_catalog_fails_against_failing_stub() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = Catalog::builtin();
    let fixtures = FixtureGenerator::new(dir.path());

    let report = Driver::new(&catalog, &fixtures, stub(1)).run_all().await.unwrap();

    // Every scenario is attempted and reported, not just the first.
    assert_eq!(report.results.len(), 3);
    assert_eq!(report.passed_count(), 0);
    for name in catalog.names() {
        assert_eq!(
            report.get(name).unwrap().outcome,
            ScenarioOutcome::Failed(ExitOutcome::Code(1))
        );
    }
}

#[tokio::test]
async fn test_stub_sees_raw_fixtures() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = Catalog::from_yaml_str(SMALL_CATALOG).unwrap();
    let fixtures = FixtureGenerator::new(dir.path()).with_raw_scenarios(["ping"]);
    let runner = stub(0).env("STUB_RUNNER_EXPECT_COMMANDS", "5");

    let report = Driver::new(&catalog, &fixtures, runner)
        .run_selected(&["ping"])
        .await
        .unwrap();

    assert!(report.all_passed(), "{:?}", report.results);
    assert_eq!(report.results[0].fixture, dir.path().join("ping.data"));
}

#[tokio::test]
async fn test_stub_rejects_wrong_command_count() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = Catalog::from_yaml_str(SMALL_CATALOG).unwrap();
    let fixtures = FixtureGenerator::new(dir.path());
    let runner = stub(0).env("STUB_RUNNER_EXPECT_COMMANDS", "3");

    let report = Driver::new(&catalog, &fixtures, runner).run_all().await.unwrap();

    assert!(report.get("incr").unwrap().passed());
    assert_eq!(
        report.get("ping").unwrap().outcome,
        ScenarioOutcome::Failed(ExitOutcome::Code(3))
    );
    assert_eq!(
        report.get("set_get").unwrap().outcome,
        ScenarioOutcome::Failed(ExitOutcome::Code(3))
    );
}

#[tokio::test]
async fn test_missing_runner_reported_as_launch_failure() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = Catalog::from_yaml_str(SMALL_CATALOG).unwrap();
    let fixtures = FixtureGenerator::new(dir.path());
    let runner = ProcessRunner::new(Path::new("/nonexistent/qredis-runner")).inherit_output(false);

    let report = Driver::new(&catalog, &fixtures, runner).run_all().await.unwrap();

    assert_eq!(report.results.len(), 3);
    for result in &report.results {
        match &result.outcome {
            ScenarioOutcome::LaunchFailed(reason) => {
                assert!(reason.contains("/nonexistent/qredis-runner"), "{reason}");
            }
            other => panic!("Expected LaunchFailed for {}, got {other:?}", result.name),
        }
    }
}
