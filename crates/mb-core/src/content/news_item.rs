use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::entity::{CollectionEntity, EntityDraft, EntityPatch};
use super::status::PublishStatus;
use crate::ids::EntityId;

/// A news / announcement article on the public site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: EntityId,
    pub title: String,
    pub body: String,
    pub image: Option<String>,
    pub published_on: NaiveDate,
    pub status: PublishStatus,
}

/// Draft news article. `published_on` is optional; the backend defaults it
/// to the creation date.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewsItemDraft {
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_on: Option<NaiveDate>,
    pub status: PublishStatus,
}

impl EntityDraft for NewsItemDraft {
    fn empty_required_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.body.trim().is_empty() {
            missing.push("body");
        }
        missing
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewsItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PublishStatus>,
}

impl EntityPatch for NewsItemPatch {
    type Entity = NewsItem;

    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.body.is_none()
            && self.published_on.is_none()
            && self.status.is_none()
    }

    fn differs_from(&self, persisted: &NewsItem) -> bool {
        self.title.as_ref().is_some_and(|v| *v != persisted.title)
            || self.body.as_ref().is_some_and(|v| *v != persisted.body)
            || self
                .published_on
                .is_some_and(|v| v != persisted.published_on)
            || self.status.is_some_and(|v| v != persisted.status)
    }

    fn apply_to(&self, persisted: &NewsItem) -> NewsItem {
        NewsItem {
            id: persisted.id,
            title: self.title.clone().unwrap_or_else(|| persisted.title.clone()),
            body: self.body.clone().unwrap_or_else(|| persisted.body.clone()),
            image: persisted.image.clone(),
            published_on: self.published_on.unwrap_or(persisted.published_on),
            status: self.status.unwrap_or(persisted.status),
        }
    }
}

impl CollectionEntity for NewsItem {
    type Draft = NewsItemDraft;
    type Patch = NewsItemPatch;

    const RESOURCE: &'static str = "news";
    const LABEL: &'static str = "news item";

    fn id(&self) -> EntityId {
        self.id
    }

    fn image_url(&self) -> Option<&str> {
        self.image.as_deref()
    }
}
