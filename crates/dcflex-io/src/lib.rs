//! Scenario file IO for dcflex.
//!
//! Scenario files are camelCase JSON documents (see `dcflex_core::Scenario`
//! for the field set). Loading validates the scenario before handing it to
//! the caller, so the model builder only re-asserts invariants it can rely
//! on being enforced here.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use dcflex_core::Scenario;

/// Load and validate a scenario from a JSON file.
pub fn load_scenario(path: impl AsRef<Path>) -> Result<Scenario> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading scenario file {}", path.display()))?;
    parse_scenario(&raw).with_context(|| format!("loading scenario file {}", path.display()))
}

/// Parse and validate a scenario from a JSON string.
pub fn parse_scenario(raw: &str) -> Result<Scenario> {
    let scenario: Scenario =
        serde_json::from_str(raw).context("deserializing scenario JSON")?;
    scenario.validate().context("validating scenario")?;
    Ok(scenario)
}

/// Write a scenario back out as pretty-printed JSON.
pub fn save_scenario(path: impl AsRef<Path>, scenario: &Scenario) -> Result<()> {
    let path = path.as_ref();
    let raw = serde_json::to_string_pretty(scenario).context("serializing scenario")?;
    fs::write(path, raw).with_context(|| format!("writing scenario file {}", path.display()))?;
    Ok(())
}
