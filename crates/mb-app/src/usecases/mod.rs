//! One use case per file, dependency-injected through ports.

pub mod commit_edit;
pub mod confirm_delete;
pub mod refresh_collection;
pub mod reorder_slides;
pub mod set_slide_active;
pub mod submit_draft;

pub use commit_edit::CommitEdit;
pub use confirm_delete::ConfirmDelete;
pub use refresh_collection::RefreshCollection;
pub use reorder_slides::ReorderSlides;
pub use set_slide_active::SetSlideActive;
pub use submit_draft::SubmitDraft;
