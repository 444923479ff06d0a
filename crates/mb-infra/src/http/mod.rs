pub mod client;
pub mod wire;

pub use client::{build_http_client, RestCollectionClient};
