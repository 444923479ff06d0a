use serde::{Deserialize, Serialize};

use super::entity::{CollectionEntity, EntityDraft, EntityPatch, RankOrdered};
use super::status::PublishStatus;
use crate::ids::EntityId;

/// One slide of the landing-page hero carousel.
///
/// `serial` is the admin-ordered rank. It is a string on the wire and stays
/// one here; reordering swaps the serials of two adjacent slides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroSlide {
    pub id: EntityId,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub image: Option<String>,
    pub serial: String,
    pub status: PublishStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeroSlideDraft {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub status: PublishStatus,
}

impl EntityDraft for HeroSlideDraft {
    fn empty_required_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.description.trim().is_empty() {
            missing.push("description");
        }
        missing
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeroSlidePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PublishStatus>,
}

impl EntityPatch for HeroSlidePatch {
    type Entity = HeroSlide;

    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.subtitle.is_none()
            && self.description.is_none()
            && self.serial.is_none()
            && self.status.is_none()
    }

    fn differs_from(&self, persisted: &HeroSlide) -> bool {
        self.title.as_ref().is_some_and(|v| *v != persisted.title)
            || self
                .subtitle
                .as_ref()
                .is_some_and(|v| *v != persisted.subtitle)
            || self
                .description
                .as_ref()
                .is_some_and(|v| *v != persisted.description)
            || self.serial.as_ref().is_some_and(|v| *v != persisted.serial)
            || self.status.is_some_and(|v| v != persisted.status)
    }

    fn apply_to(&self, persisted: &HeroSlide) -> HeroSlide {
        HeroSlide {
            id: persisted.id,
            title: self.title.clone().unwrap_or_else(|| persisted.title.clone()),
            subtitle: self
                .subtitle
                .clone()
                .unwrap_or_else(|| persisted.subtitle.clone()),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| persisted.description.clone()),
            image: persisted.image.clone(),
            serial: self
                .serial
                .clone()
                .unwrap_or_else(|| persisted.serial.clone()),
            status: self.status.unwrap_or(persisted.status),
        }
    }
}

impl CollectionEntity for HeroSlide {
    type Draft = HeroSlideDraft;
    type Patch = HeroSlidePatch;

    const RESOURCE: &'static str = "hero-slides";
    const LABEL: &'static str = "hero slide";

    fn id(&self) -> EntityId {
        self.id
    }

    fn image_url(&self) -> Option<&str> {
        self.image.as_deref()
    }
}

impl RankOrdered for HeroSlide {
    fn rank(&self) -> &str {
        &self.serial
    }

    fn rank_patch(rank: String) -> HeroSlidePatch {
        HeroSlidePatch {
            serial: Some(rank),
            ..HeroSlidePatch::default()
        }
    }
}
