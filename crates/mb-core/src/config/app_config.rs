//! Admin panel configuration domain model.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the admin panel client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// REST backend settings.
    pub api: ApiConfig,

    /// Static asset settings.
    pub assets: AssetConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the admin REST API, without a trailing slash.
    pub base_url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// Records per page requested from list endpoints.
    pub page_size: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Placeholder shown when a record has no image or its image fails to
    /// load.
    pub placeholder_image: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            assets: AssetConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api/admin".to_string(),
            timeout_secs: 30,
            page_size: 10,
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            placeholder_image: "/assets/img/placeholder.png".to_string(),
        }
    }
}
