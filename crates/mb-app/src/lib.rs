//! MediBoard Application Orchestration Layer
//!
//! This crate contains the admin-panel use cases and the per-resource
//! facades that bundle them with shared manager state.

pub mod facade;
pub mod usecases;

pub use facade::{CollectionFacade, HeroSlidePanel, MIN_SLIDES};
pub use usecases::{
    CommitEdit, ConfirmDelete, RefreshCollection, ReorderSlides, SetSlideActive, SubmitDraft,
};
