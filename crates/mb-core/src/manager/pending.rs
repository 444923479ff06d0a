//! In-flight mutation tracking.

use std::collections::HashSet;

use crate::ids::{DraftId, EntityId};

/// Key of a mutation target: a persisted record or an unsaved draft.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MutationKey {
    Persisted(EntityId),
    Draft(DraftId),
}

impl std::fmt::Display for MutationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MutationKey::Persisted(id) => write!(f, "record {id}"),
            MutationKey::Draft(id) => write!(f, "draft {id}"),
        }
    }
}

/// Per-key in-flight flags.
///
/// Invariant: at most one in-flight mutation per key. `try_mark` is the
/// only way in, so double submission is impossible by construction.
#[derive(Debug, Default)]
pub struct PendingFlags {
    in_flight: HashSet<MutationKey>,
}

impl PendingFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the key pending. Returns false when a mutation for it is
    /// already in flight.
    pub fn try_mark(&mut self, key: MutationKey) -> bool {
        self.in_flight.insert(key)
    }

    /// Clear the key, success or failure alike.
    pub fn clear(&mut self, key: &MutationKey) {
        self.in_flight.remove(key);
    }

    pub fn is_pending(&self, key: &MutationKey) -> bool {
        self.in_flight.contains(key)
    }

    pub fn any_pending(&self) -> bool {
        !self.in_flight.is_empty()
    }

    pub fn clear_all(&mut self) {
        self.in_flight.clear();
    }
}
