//! Scenario runner and conformance reports.

use std::fmt;

use kompare_core::{Classify, Comparator, Divergence, MismatchKind, TOP_LEVEL};

use crate::scenario::{Scenario, ScenarioError};

/// A difference between what a scenario expected and what the comparator
/// produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioMismatch {
    /// An expected divergence was not produced.
    Missing { path: String, kind: MismatchKind },

    /// A divergence was produced that the scenario did not expect.
    Unexpected { path: String, kind: MismatchKind },
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        TOP_LEVEL
    } else {
        path
    }
}

impl fmt::Display for ScenarioMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioMismatch::Missing { path, kind } => {
                write!(f, "Missing divergence: {} at {}", kind, display_path(path))
            }
            ScenarioMismatch::Unexpected { path, kind } => {
                write!(f, "Unexpected divergence: {} at {}", kind, display_path(path))
            }
        }
    }
}

/// Result of running one scenario.
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    /// Scenario name.
    pub name: String,

    /// Divergences the comparator produced.
    pub divergences: Vec<Divergence>,

    /// Differences from the scenario's expectation.
    pub mismatches: Vec<ScenarioMismatch>,
}

impl ScenarioResult {
    /// Whether the comparator produced exactly the expected divergences.
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// Format the result as a human-readable block.
    pub fn report(&self) -> String {
        if self.passed() {
            return format!("{}: ok", self.name);
        }

        let mut lines = vec![format!(
            "{}: {} problem(s)",
            self.name,
            self.mismatches.len()
        )];
        for m in &self.mismatches {
            lines.push(format!("  - {}", m));
        }
        lines.join("\n")
    }
}

/// Run a scenario with the default comparator.
pub fn run_scenario(scenario: &Scenario) -> ScenarioResult {
    run_scenario_with(&Comparator::new(), scenario)
}

/// Run a scenario with a specific comparator.
///
/// Expected and produced divergences are matched as multisets of
/// `(rendered path, kind)`; order does not matter.
pub fn run_scenario_with<C: Classify>(
    comparator: &Comparator<C>,
    scenario: &Scenario,
) -> ScenarioResult {
    let report = comparator.compare(&scenario.actual, &scenario.expected);

    let mut unmatched: Vec<(String, MismatchKind)> = report
        .iter()
        .map(|d| (d.path.render(), d.kind()))
        .collect();
    let mut mismatches = Vec::new();

    for exp in &scenario.expect {
        let wanted = (exp.rendered_path().to_string(), exp.kind);
        match unmatched.iter().position(|found| *found == wanted) {
            Some(idx) => {
                unmatched.swap_remove(idx);
            }
            None => mismatches.push(ScenarioMismatch::Missing {
                path: wanted.0,
                kind: wanted.1,
            }),
        }
    }

    mismatches.extend(
        unmatched
            .into_iter()
            .map(|(path, kind)| ScenarioMismatch::Unexpected { path, kind }),
    );

    let result = ScenarioResult {
        name: scenario.name.clone(),
        divergences: report.into_divergences(),
        mismatches,
    };
    log::debug!(
        "Scenario '{}' {}",
        result.name,
        if result.passed() { "passed" } else { "failed" }
    );
    result
}

/// Results of running a set of scenarios.
#[derive(Debug, Clone, Default)]
pub struct ConformanceReport {
    /// One result per scenario, in run order.
    pub results: Vec<ScenarioResult>,
}

impl ConformanceReport {
    /// Whether every scenario passed.
    pub fn passed(&self) -> bool {
        self.results.iter().all(ScenarioResult::passed)
    }

    /// Results of scenarios that failed.
    pub fn failures(&self) -> Vec<&ScenarioResult> {
        self.results.iter().filter(|r| !r.passed()).collect()
    }

    /// Format the failures as a human-readable report.
    pub fn report(&self) -> String {
        let failures = self.failures();
        if failures.is_empty() {
            return format!("All {} scenarios passed.", self.results.len());
        }

        let mut lines = vec![format!(
            "{} of {} scenarios failed:",
            failures.len(),
            self.results.len()
        )];
        for r in failures {
            lines.push(r.report());
        }
        lines.join("\n")
    }

    /// Convert into a result, failing with the report if any scenario failed.
    pub fn into_result(self) -> Result<(), ScenarioError> {
        if self.passed() {
            Ok(())
        } else {
            Err(ScenarioError::Failed {
                report: self.report(),
            })
        }
    }
}

/// Run every scenario with the default comparator.
pub fn run_all(scenarios: &[Scenario]) -> ConformanceReport {
    let results: Vec<ScenarioResult> = scenarios.iter().map(run_scenario).collect();
    let report = ConformanceReport { results };
    log::info!(
        "Ran {} scenario(s), {} failed",
        report.results.len(),
        report.failures().len()
    );
    report
}
