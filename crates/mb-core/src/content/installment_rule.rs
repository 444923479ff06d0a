use serde::{Deserialize, Serialize};

use super::entity::{CollectionEntity, EntityDraft, EntityPatch};
use super::status::PublishStatus;
use crate::ids::EntityId;

/// A payment installment plan offered for treatments.
///
/// Text and numbers only; this collection has no image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallmentRule {
    pub id: EntityId,
    pub title: String,
    pub months: u32,
    pub down_payment_percent: f64,
    pub description: String,
    pub status: PublishStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InstallmentRuleDraft {
    pub title: String,
    pub months: u32,
    pub down_payment_percent: f64,
    pub description: String,
    pub status: PublishStatus,
}

impl EntityDraft for InstallmentRuleDraft {
    fn empty_required_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.description.trim().is_empty() {
            missing.push("description");
        }
        if self.months == 0 {
            missing.push("months");
        }
        missing
    }

    fn requires_image() -> bool {
        false
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InstallmentRulePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub months: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub down_payment_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PublishStatus>,
}

impl EntityPatch for InstallmentRulePatch {
    type Entity = InstallmentRule;

    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.months.is_none()
            && self.down_payment_percent.is_none()
            && self.description.is_none()
            && self.status.is_none()
    }

    fn differs_from(&self, persisted: &InstallmentRule) -> bool {
        self.title.as_ref().is_some_and(|v| *v != persisted.title)
            || self.months.is_some_and(|v| v != persisted.months)
            || self
                .down_payment_percent
                .is_some_and(|v| v != persisted.down_payment_percent)
            || self
                .description
                .as_ref()
                .is_some_and(|v| *v != persisted.description)
            || self.status.is_some_and(|v| v != persisted.status)
    }

    fn apply_to(&self, persisted: &InstallmentRule) -> InstallmentRule {
        InstallmentRule {
            id: persisted.id,
            title: self.title.clone().unwrap_or_else(|| persisted.title.clone()),
            months: self.months.unwrap_or(persisted.months),
            down_payment_percent: self
                .down_payment_percent
                .unwrap_or(persisted.down_payment_percent),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| persisted.description.clone()),
            status: self.status.unwrap_or(persisted.status),
        }
    }
}

impl CollectionEntity for InstallmentRule {
    type Draft = InstallmentRuleDraft;
    type Patch = InstallmentRulePatch;

    const RESOURCE: &'static str = "installment-rules";
    const LABEL: &'static str = "installment rule";

    fn id(&self) -> EntityId {
        self.id
    }
}
