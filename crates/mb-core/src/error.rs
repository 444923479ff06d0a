//! Error taxonomy for the admin panel core.
//!
//! Three tiers: client-side validation failures (reported before any
//! network call), API failures (scoped to one mutation, local state kept
//! for retry) and manager-level misuse. Nothing here is fatal to the
//! process.

use thiserror::Error;

use crate::ids::{DraftId, EntityId};

/// Client-side validation failure for a draft submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", validation_message(.empty_fields, .missing_image))]
pub struct ValidationError {
    /// Required fields that were empty, in declaration order.
    pub empty_fields: Vec<&'static str>,
    /// Whether a required image file was missing.
    pub missing_image: bool,
}

fn validation_message(empty_fields: &[&'static str], missing_image: &bool) -> String {
    let mut parts = Vec::new();
    if !empty_fields.is_empty() {
        parts.push(format!(
            "required fields are empty: {}",
            empty_fields.join(", ")
        ));
    }
    if *missing_image {
        parts.push("an image must be selected".to_string());
    }
    parts.join("; ")
}

/// Failure of a single REST call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("resource not found")]
    NotFound,
    #[error("server rejected the request ({code}): {message}")]
    Status { code: u16, message: String },
    #[error("could not decode server response: {0}")]
    Decode(String),
}

/// Errors surfaced by collection-manager operations and use cases.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ManagerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("another change for this record is still in flight")]
    MutationInFlight,
    #[error("unknown record id {0}")]
    UnknownEntity(EntityId),
    #[error("unknown draft {0}")]
    UnknownDraft(DraftId),
    #[error("there are no changes to save")]
    NothingToSave,
    #[error("at least {min} record(s) must remain in this collection")]
    MinimumCardinality { min: usize },
    #[error("no record is awaiting delete confirmation")]
    NoDeleteCandidate,
    #[error("reorder failed for {}: {message}", display_ids(.failed))]
    ReorderFailed {
        /// Slides whose rank update did not go through.
        failed: Vec<EntityId>,
        message: String,
    },
}

fn display_ids(ids: &[EntityId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
