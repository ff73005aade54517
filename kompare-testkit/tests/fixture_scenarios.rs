//! Runs the scenario files shipped under `fixtures/`.

use std::path::PathBuf;

use kompare_testkit::{load_dir, run_all, run_dir, run_scenario, standard, Scenario};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

#[test]
fn fixture_scenarios_pass() {
    let _ = env_logger::builder().is_test(true).try_init();

    let report = run_dir(&fixtures_dir()).unwrap();
    assert!(!report.results.is_empty());
    assert!(report.passed(), "{}", report.report());
}

#[test]
fn fixture_scenarios_are_described() {
    for scenario in load_dir(&fixtures_dir()).unwrap() {
        assert!(!scenario.name.is_empty());
        assert!(!scenario.description.is_empty(), "{} has no description", scenario.name);
    }
}

#[test]
fn standard_scenarios_pass() {
    let report = run_all(&standard::all());
    assert!(report.passed(), "{}", report.report());
}

#[test]
fn toml_datetimes_load_as_text() {
    let scenario = Scenario::load(&fixtures_dir().join("records/release.toml")).unwrap();
    let result = run_scenario(&scenario);
    assert!(result.passed(), "{}", result.report());

    assert_eq!(result.divergences.len(), 1);
    assert_eq!(result.divergences[0].path.render(), "release.published");
    assert_eq!(
        result.divergences[0].actual().to_string(),
        "1979-05-27T07:32:00Z"
    );
}
