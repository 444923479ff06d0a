//! MediBoard Library
//!
//! Admin content panel core for the MediBoard hospital marketing site:
//! configuration, logging and the wired-up [`AdminPanel`].

pub mod builder;
pub mod logging;

// Re-export the layers for embedders
pub use mb_app;
pub use mb_core;
pub use mb_infra;

// Re-export commonly used types
pub use builder::AdminPanel;
pub use logging::init_logging;
pub use mb_core::{
    AdminConfig, ApiError, DraftId, EntityId, LocalImage, ManagerError, PublishStatus,
    RenderEntry, ValidationError,
};
pub use mb_infra::load_config;
