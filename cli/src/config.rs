use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use libraries::BinderConfig;
use serde::Deserialize;
use tracing::debug;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "zbind.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ProjectConfig {
    bindings: BinderConfig,
}

pub fn parse_config(content: &str) -> Result<BinderConfig> {
    let project: ProjectConfig = toml::from_str(content).context("Invalid binding configuration")?;
    Ok(project.bindings)
}

/// Load the binding configuration.
///
/// An explicit path must exist. Without one, `zbind.toml` is used if present,
/// otherwise every binding keeps its descriptor default.
pub fn load_config(path: Option<&str>) -> Result<BinderConfig> {
    let path = match path {
        Some(p) => p,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => DEFAULT_CONFIG_FILE,
        None => return Ok(BinderConfig::default()),
    };
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read config `{path}`"))?;
    let config = parse_config(&content).with_context(|| format!("In `{path}`"))?;
    debug!(path, ?config, "configuration loaded");
    Ok(config)
}
