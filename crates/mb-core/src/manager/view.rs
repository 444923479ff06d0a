//! Reconciliation view: the render-ready projection of a collection.

use crate::content::{CollectionEntity, ImageRef};
use crate::ids::DraftId;

/// One row of the rendered list.
///
/// Drafts come first in creation order, then persisted entities in server
/// order, each projected through its overlay. Renderers must read fields
/// from these entries only, never from the raw persisted records.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderEntry<E: CollectionEntity> {
    /// A client-only draft awaiting submission.
    Draft {
        id: DraftId,
        fields: E::Draft,
        image: ImageRef,
        /// A create mutation for this draft is in flight.
        pending: bool,
    },
    /// A persisted record, merged with its pending edits.
    Persisted {
        entity: E,
        image: ImageRef,
        /// This record is the one currently open for inline editing.
        editing: bool,
        /// Saving now would change something (gates the Save control).
        dirty: bool,
        /// An update or delete mutation for this record is in flight.
        pending: bool,
    },
}

impl<E: CollectionEntity> RenderEntry<E> {
    /// Whether this row's controls should be disabled.
    pub fn is_pending(&self) -> bool {
        match self {
            RenderEntry::Draft { pending, .. } => *pending,
            RenderEntry::Persisted { pending, .. } => *pending,
        }
    }

    pub fn image(&self) -> &ImageRef {
        match self {
            RenderEntry::Draft { image, .. } => image,
            RenderEntry::Persisted { image, .. } => image,
        }
    }
}
