//! Identifier newtypes shared across collections.

mod draft_id;
mod entity_id;
mod id_macro;

pub use draft_id::DraftId;
pub use entity_id::EntityId;
