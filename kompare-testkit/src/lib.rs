//! kompare Test Kit - Conformance testing utilities.
//!
//! This crate provides fixture-driven testing for the kompare comparator:
//! a scenario names two values and the divergences comparing them must
//! produce, and the runner checks the comparator against it.
//!
//! # Key Types
//!
//! - [`Scenario`]: An actual/expected pair plus its expected divergences
//! - [`ScenarioResult`]: What one scenario produced and how it differed
//! - [`ConformanceReport`]: Results of running a set of scenarios
//!
//! # Scenario files
//!
//! Scenarios can be written in YAML, JSON or TOML:
//!
//! ```yaml
//! name: nested_value_mismatch
//! description: A nested leaf difference is reported at its full path
//! actual: {x: 1, y: {z: blah, a: blah}}
//! expected: {x: 1, y: {z: bloop, a: blah}}
//! expect:
//!   - path: y.z
//!     kind: value_mismatch
//! ```
//!
//! # Example
//!
//! ```
//! use kompare_testkit::{run_all, standard};
//!
//! let report = run_all(&standard::all());
//! assert!(report.passed(), "{}", report.report());
//! ```

mod scenario;
mod runner;
mod fixtures;
mod integration;

pub use scenario::{Scenario, ScenarioBuilder, ScenarioError, ScenarioFormat, ExpectedDivergence, standard};
pub use runner::{ScenarioMismatch, ScenarioResult, ConformanceReport, run_scenario, run_scenario_with, run_all};
pub use fixtures::{scenario_files, load_dir, run_dir};

/// Re-export kompare_core for convenience in tests.
pub use kompare_core;
