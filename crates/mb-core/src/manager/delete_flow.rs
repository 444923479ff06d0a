//! Two-step delete confirmation state.

use crate::ids::EntityId;

/// State of the delete confirmation prompt.
///
/// `request` opens the prompt for a candidate; `take` consumes it when the
/// user confirms; `dismiss` closes the prompt without consequence. After a
/// failed delete the candidate stays discarded, so retrying means asking
/// again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeleteFlow {
    #[default]
    Idle,
    Confirming(EntityId),
}

impl DeleteFlow {
    pub fn request(&mut self, id: EntityId) {
        *self = DeleteFlow::Confirming(id);
    }

    pub fn candidate(&self) -> Option<EntityId> {
        match self {
            DeleteFlow::Confirming(id) => Some(*id),
            DeleteFlow::Idle => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, DeleteFlow::Confirming(_))
    }

    /// Consume the candidate, closing the prompt.
    pub fn take(&mut self) -> Option<EntityId> {
        match std::mem::take(self) {
            DeleteFlow::Confirming(id) => Some(id),
            DeleteFlow::Idle => None,
        }
    }

    pub fn dismiss(&mut self) {
        *self = DeleteFlow::Idle;
    }
}
