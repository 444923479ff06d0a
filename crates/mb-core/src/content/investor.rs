use serde::{Deserialize, Serialize};

use super::entity::{CollectionEntity, EntityDraft, EntityPatch};
use super::status::PublishStatus;
use crate::ids::EntityId;

/// An investor / partner organisation shown on the about pages.
///
/// The image here is the organisation logo, so the upload field is `logo`
/// rather than `image`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investor {
    pub id: EntityId,
    pub name: String,
    pub website: Option<String>,
    pub logo: Option<String>,
    pub status: PublishStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InvestorDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub status: PublishStatus,
}

impl EntityDraft for InvestorDraft {
    fn empty_required_fields(&self) -> Vec<&'static str> {
        if self.name.trim().is_empty() {
            vec!["name"]
        } else {
            Vec::new()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InvestorPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PublishStatus>,
}

impl EntityPatch for InvestorPatch {
    type Entity = Investor;

    fn is_empty(&self) -> bool {
        self.name.is_none() && self.website.is_none() && self.status.is_none()
    }

    fn differs_from(&self, persisted: &Investor) -> bool {
        self.name.as_ref().is_some_and(|v| *v != persisted.name)
            || self
                .website
                .as_ref()
                .is_some_and(|v| Some(v) != persisted.website.as_ref())
            || self.status.is_some_and(|v| v != persisted.status)
    }

    fn apply_to(&self, persisted: &Investor) -> Investor {
        Investor {
            id: persisted.id,
            name: self.name.clone().unwrap_or_else(|| persisted.name.clone()),
            website: self.website.clone().or_else(|| persisted.website.clone()),
            logo: persisted.logo.clone(),
            status: self.status.unwrap_or(persisted.status),
        }
    }
}

impl CollectionEntity for Investor {
    type Draft = InvestorDraft;
    type Patch = InvestorPatch;

    const RESOURCE: &'static str = "investors";
    const LABEL: &'static str = "investor";
    const IMAGE_FIELD: &'static str = "logo";

    fn id(&self) -> EntityId {
        self.id
    }

    fn image_url(&self) -> Option<&str> {
        self.logo.as_deref()
    }
}
