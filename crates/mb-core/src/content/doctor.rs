use serde::{Deserialize, Serialize};

use super::entity::{CollectionEntity, EntityDraft, EntityPatch};
use super::status::PublishStatus;
use crate::ids::EntityId;

/// A doctor profile shown on the "our specialists" pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: EntityId,
    pub name: String,
    pub designation: String,
    pub department: String,
    pub bio: String,
    pub image: Option<String>,
    pub status: PublishStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DoctorDraft {
    pub name: String,
    pub designation: String,
    pub department: String,
    pub bio: String,
    pub status: PublishStatus,
}

impl EntityDraft for DoctorDraft {
    fn empty_required_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.designation.trim().is_empty() {
            missing.push("designation");
        }
        if self.department.trim().is_empty() {
            missing.push("department");
        }
        missing
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DoctorPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PublishStatus>,
}

impl EntityPatch for DoctorPatch {
    type Entity = Doctor;

    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.designation.is_none()
            && self.department.is_none()
            && self.bio.is_none()
            && self.status.is_none()
    }

    fn differs_from(&self, persisted: &Doctor) -> bool {
        self.name.as_ref().is_some_and(|v| *v != persisted.name)
            || self
                .designation
                .as_ref()
                .is_some_and(|v| *v != persisted.designation)
            || self
                .department
                .as_ref()
                .is_some_and(|v| *v != persisted.department)
            || self.bio.as_ref().is_some_and(|v| *v != persisted.bio)
            || self.status.is_some_and(|v| v != persisted.status)
    }

    fn apply_to(&self, persisted: &Doctor) -> Doctor {
        Doctor {
            id: persisted.id,
            name: self.name.clone().unwrap_or_else(|| persisted.name.clone()),
            designation: self
                .designation
                .clone()
                .unwrap_or_else(|| persisted.designation.clone()),
            department: self
                .department
                .clone()
                .unwrap_or_else(|| persisted.department.clone()),
            bio: self.bio.clone().unwrap_or_else(|| persisted.bio.clone()),
            image: persisted.image.clone(),
            status: self.status.unwrap_or(persisted.status),
        }
    }
}

impl CollectionEntity for Doctor {
    type Draft = DoctorDraft;
    type Patch = DoctorPatch;

    const RESOURCE: &'static str = "doctors";
    const LABEL: &'static str = "doctor";

    fn id(&self) -> EntityId {
        self.id
    }

    fn image_url(&self) -> Option<&str> {
        self.image.as_deref()
    }
}
