pub mod app_config;

pub use app_config::{AdminConfig, ApiConfig, AssetConfig};
