//! # mb-core
//!
//! Core domain models and collection-manager logic for MediBoard.
//!
//! This crate contains pure business logic without any infrastructure
//! dependencies: the content collections of the hospital site, the
//! draft/overlay/reconciliation state machine behind every admin screen,
//! and the ports adapters implement.

// Public module exports
pub mod config;
pub mod content;
pub mod error;
pub mod ids;
pub mod manager;
pub mod ports;

// Re-export commonly used types at the crate root
pub use config::AdminConfig;
pub use content::{
    CollectionEntity, Doctor, Facility, HeroSlide, ImageRef, ImageSource, InstallmentRule,
    Investor, LocalImage, NewsItem, PreviewHandle, PublishStatus,
};
pub use error::{ApiError, ManagerError, ValidationError};
pub use ids::{DraftId, EntityId};
pub use manager::{CollectionManager, MutationKey, RenderEntry};
pub use ports::{CollectionApiPort, HeroSlideApiPort, Page, PageInfo, PreviewStorePort};
