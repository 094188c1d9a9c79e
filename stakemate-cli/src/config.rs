use anyhow::Context;
use stakemate_core::JoinConfig;
use std::path::PathBuf;

fn default_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stakemate")
        .join("config.json")
}

/// Load the join configuration from `path` (or the platform default
/// location), falling back to built-in defaults when no file exists.
pub fn load(path: Option<PathBuf>) -> anyhow::Result<JoinConfig> {
    let path = path.unwrap_or_else(default_path);
    if !path.exists() {
        return Ok(JoinConfig::default());
    }
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
}
