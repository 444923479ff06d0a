//! Loading the admin configuration from a TOML file.

use std::path::Path;

use anyhow::{Context, Result};
use tokio::fs;
use tracing::info;

use mb_core::config::AdminConfig;

/// Load configuration from `path`, falling back to defaults when the file
/// does not exist. A present-but-broken file is an error; silently running
/// against defaults would hide a typo in the config.
pub async fn load_config(path: impl AsRef<Path>) -> Result<AdminConfig> {
    let path = path.as_ref();
    if !fs::try_exists(path)
        .await
        .with_context(|| format!("probe config file failed: {}", path.display()))?
    {
        info!(path = %path.display(), "no config file; using defaults");
        return Ok(AdminConfig::default());
    }
    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("read config file failed: {}", path.display()))?;
    let config: AdminConfig =
        toml::from_str(&raw).with_context(|| format!("parse config failed: {}", path.display()))?;
    info!(path = %path.display(), base_url = %config.api.base_url, "loaded config");
    Ok(config)
}
