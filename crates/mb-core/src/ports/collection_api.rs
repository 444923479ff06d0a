//! Remote collection client port.
//!
//! One implementation per transport (the REST adapter lives in `mb-infra`);
//! the manager and use cases only ever see this trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::content::{CollectionEntity, HeroSlide, LocalImage, PublishStatus};
use crate::error::ApiError;
use crate::ids::EntityId;

/// Pagination block returned by every list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub current_page: u32,
    pub per_page: u32,
    pub total_count: u64,
    pub total_page: u32,
}

/// One page of a remote collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<E> {
    pub data: Vec<E>,
    pub pagination: PageInfo,
}

impl<E> Page<E> {
    /// Single-page helper for fixtures and fakes.
    pub fn single(data: Vec<E>, per_page: u32) -> Self {
        let total_count = data.len() as u64;
        Self {
            data,
            pagination: PageInfo {
                current_page: 1,
                per_page,
                total_count,
                total_page: 1,
            },
        }
    }
}

/// CRUD collaborator for one REST-managed collection.
///
/// Mutations take the draft/patch by reference plus an optional image file;
/// the adapter decides between JSON and multipart form data. `delete`
/// reports a server-side refusal as an [`ApiError`], so `Ok(())` always
/// means the record is gone.
#[async_trait]
pub trait CollectionApiPort<E: CollectionEntity>: Send + Sync {
    async fn list(&self, page: u32) -> Result<Page<E>, ApiError>;

    async fn get(&self, id: EntityId) -> Result<E, ApiError>;

    async fn create(&self, draft: &E::Draft, image: Option<&LocalImage>) -> Result<E, ApiError>;

    async fn update(
        &self,
        id: EntityId,
        patch: &E::Patch,
        image: Option<&LocalImage>,
    ) -> Result<E, ApiError>;

    async fn delete(&self, id: EntityId) -> Result<(), ApiError>;
}

/// Hero-slide client: the base CRUD surface plus the dedicated
/// activate/deactivate endpoint.
#[async_trait]
pub trait HeroSlideApiPort: CollectionApiPort<HeroSlide> {
    async fn set_active(&self, id: EntityId, status: PublishStatus) -> Result<HeroSlide, ApiError>;
}
