use serde::{Deserialize, Serialize};

use super::id_macro::impl_string_id;

/// Client-generated temporary identifier for a not-yet-persisted draft.
///
/// Drafts never reach the server with this id; it only keys local state
/// until the create mutation succeeds and the server assigns a real
/// [`EntityId`](super::EntityId).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DraftId(String);

impl_string_id!(DraftId);
