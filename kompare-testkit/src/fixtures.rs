//! Scenario discovery on disk.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::runner::{run_all, ConformanceReport};
use crate::scenario::{Scenario, ScenarioError, ScenarioFormat};

/// List scenario files (YAML, JSON, TOML) under `dir`, sorted by path.
///
/// Files with other extensions are ignored.
pub fn scenario_files(dir: &Path) -> Result<Vec<PathBuf>, ScenarioError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_file() && ScenarioFormat::from_path(entry.path()).is_some() {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Load every scenario file under `dir`.
pub fn load_dir(dir: &Path) -> Result<Vec<Scenario>, ScenarioError> {
    let files = scenario_files(dir)?;
    log::debug!("Found {} scenario file(s) in {}", files.len(), dir.display());
    files.iter().map(|p| Scenario::load(p)).collect()
}

/// Load and run every scenario under `dir`.
pub fn run_dir(dir: &Path) -> Result<ConformanceReport, ScenarioError> {
    let scenarios = load_dir(dir)?;
    Ok(run_all(&scenarios))
}
