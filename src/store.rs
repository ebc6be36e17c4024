//! # Store Module
//!
//! Persists the household state as one JSON document. Saves go through a
//! temporary file in the same directory that is renamed over the target, so a
//! crash mid-write never leaves a truncated state file behind.

use crate::household::HouseholdState;
use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Load the state at `path`; a missing file yields the sample state
pub fn load_state(path: &Path) -> Result<HouseholdState> {
    if !path.exists() {
        info!("No state file at {}, starting from sample data", path.display());
        return Ok(HouseholdState::sample());
    }

    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read state file {}", path.display()))?;
    let state: HouseholdState = serde_json::from_str(&raw)
        .with_context(|| format!("State file {} is not valid", path.display()))?;

    debug!(
        "Loaded {} recipes, {} weeks, {} inventory rows",
        state.recipes.len(),
        state.meal_plans.len(),
        state.inventory.len()
    );
    Ok(state)
}

/// Write `state` to `path` atomically
pub fn save_state(path: &Path, state: &HouseholdState) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let json = serde_json::to_string_pretty(state).context("Failed to serialize state")?;
    let mut file = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    file.write_all(json.as_bytes())
        .context("Failed to write state")?;
    file.flush().context("Failed to flush state")?;
    file.persist(path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;

    info!("Saved state to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_sample_state() {
        let dir = TempDir::new().unwrap();
        let state = load_state(&dir.path().join("missing.json")).unwrap();
        assert_eq!(state.recipes.len(), 7);
        assert!(state.meal_plans.is_empty());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(load_state(&path).is_err());
    }
}
