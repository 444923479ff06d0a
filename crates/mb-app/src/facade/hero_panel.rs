//! The hero-slider screen: the generic facade plus slide-only actions.

use std::sync::Arc;

use mb_core::content::HeroSlide;
use mb_core::ports::{CollectionApiPort, HeroSlideApiPort, PreviewStorePort};
use mb_core::{EntityId, ManagerError, PublishStatus};

use crate::usecases::{RefreshCollection, ReorderSlides, SetSlideActive};

use super::collection::CollectionFacade;

/// The hero slider must never end up empty on the public site.
pub const MIN_SLIDES: usize = 1;

/// Admin surface for the hero slider: the standard collection cycle plus
/// reordering and the dedicated activate/deactivate endpoint.
pub struct HeroSlidePanel {
    slides: CollectionFacade<HeroSlide>,
    set_active: SetSlideActive,
    reorder: ReorderSlides,
}

impl HeroSlidePanel {
    pub fn from_client<A>(api: Arc<A>, previews: Arc<dyn PreviewStorePort>) -> Self
    where
        A: HeroSlideApiPort + 'static,
    {
        let crud: Arc<dyn CollectionApiPort<HeroSlide>> = api.clone();
        let hero: Arc<dyn HeroSlideApiPort> = api;
        let slides = CollectionFacade::from_parts(crud.clone(), previews, MIN_SLIDES);
        let weak = Arc::downgrade(slides.state());
        let refresh = RefreshCollection::from_parts(crud.clone(), weak.clone());
        let set_active = SetSlideActive::from_parts(hero, weak.clone(), refresh.clone());
        let reorder = ReorderSlides::from_parts(crud, weak, refresh);
        Self {
            slides,
            set_active,
            reorder,
        }
    }

    /// The generic collection cycle (drafts, edits, deletes, rendering).
    pub fn slides(&self) -> &CollectionFacade<HeroSlide> {
        &self.slides
    }

    pub async fn set_active(
        &self,
        id: EntityId,
        status: PublishStatus,
    ) -> Result<(), ManagerError> {
        self.set_active.execute(id, status).await
    }

    /// Swap the display rank of two adjacent slides.
    pub async fn reorder(&self, first: EntityId, second: EntityId) -> Result<(), ManagerError> {
        self.reorder.execute(first, second).await
    }
}
