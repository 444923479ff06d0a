use serde::{Deserialize, Serialize};

use super::entity::{CollectionEntity, EntityDraft, EntityPatch};
use super::status::PublishStatus;
use crate::ids::EntityId;

/// A hospital facility card (ICU, radiology, pharmacy, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub status: PublishStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FacilityDraft {
    pub name: String,
    pub description: String,
    pub status: PublishStatus,
}

impl EntityDraft for FacilityDraft {
    fn empty_required_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.description.trim().is_empty() {
            missing.push("description");
        }
        missing
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FacilityPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PublishStatus>,
}

impl EntityPatch for FacilityPatch {
    type Entity = Facility;

    fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.status.is_none()
    }

    fn differs_from(&self, persisted: &Facility) -> bool {
        self.name.as_ref().is_some_and(|v| *v != persisted.name)
            || self
                .description
                .as_ref()
                .is_some_and(|v| *v != persisted.description)
            || self.status.is_some_and(|v| v != persisted.status)
    }

    fn apply_to(&self, persisted: &Facility) -> Facility {
        Facility {
            id: persisted.id,
            name: self.name.clone().unwrap_or_else(|| persisted.name.clone()),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| persisted.description.clone()),
            image: persisted.image.clone(),
            status: self.status.unwrap_or(persisted.status),
        }
    }
}

impl CollectionEntity for Facility {
    type Draft = FacilityDraft;
    type Patch = FacilityPatch;

    const RESOURCE: &'static str = "facilities";
    const LABEL: &'static str = "facility";

    fn id(&self) -> EntityId {
        self.id
    }

    fn image_url(&self) -> Option<&str> {
        self.image.as_deref()
    }
}
