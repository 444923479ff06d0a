//! Infrastructure adapters for MediBoard: the REST client behind the
//! collection ports, the in-memory preview store and config loading.

pub mod config_loader;
pub mod http;
pub mod preview;

pub use config_loader::load_config;
pub use http::{build_http_client, RestCollectionClient};
pub use preview::InMemoryPreviewStore;
