use std::sync::{Arc, Weak};

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use mb_core::content::HeroSlide;
use mb_core::manager::{CollectionManager, MutationKey};
use mb_core::ports::CollectionApiPort;
use mb_core::{EntityId, ManagerError};

use super::refresh_collection::RefreshCollection;

/// Use case for swapping the rank of two adjacent hero slides.
///
/// Both rank updates are issued concurrently and treated as one logical
/// operation for error reporting. There is no compensating rollback: if a
/// leg fails the server may briefly hold duplicate ranks, and the next
/// re-fetch restores a consistent order.
pub struct ReorderSlides {
    api: Arc<dyn CollectionApiPort<HeroSlide>>,
    state: Weak<Mutex<CollectionManager<HeroSlide>>>,
    refresh: RefreshCollection<HeroSlide>,
}

impl ReorderSlides {
    pub fn from_parts(
        api: Arc<dyn CollectionApiPort<HeroSlide>>,
        state: Weak<Mutex<CollectionManager<HeroSlide>>>,
        refresh: RefreshCollection<HeroSlide>,
    ) -> Self {
        Self {
            api,
            state,
            refresh,
        }
    }

    #[tracing::instrument(
        name = "usecase.reorder_slides.execute",
        skip(self),
        fields(first = %first, second = %second)
    )]
    pub async fn execute(&self, first: EntityId, second: EntityId) -> Result<(), ManagerError> {
        let first_key = MutationKey::Persisted(first);
        let second_key = MutationKey::Persisted(second);

        let (leg_a, leg_b, page) = {
            let Some(state) = self.state.upgrade() else {
                return Ok(());
            };
            let mut manager = state.lock().await;
            let (leg_a, leg_b) = manager.swap_rank_legs(first, second)?;
            if manager.is_pending(&first_key) || manager.is_pending(&second_key) {
                return Err(ManagerError::MutationInFlight);
            }
            manager.try_begin_mutation(first_key.clone());
            manager.try_begin_mutation(second_key.clone());
            (leg_a, leg_b, manager.current_page())
        };

        let (result_a, result_b) = futures::join!(
            self.api.update(leg_a.id, &leg_a.patch, None),
            self.api.update(leg_b.id, &leg_b.patch, None),
        );

        let Some(state) = self.state.upgrade() else {
            debug!("state gone mid-flight; dropping reorder results");
            return Ok(());
        };
        {
            let mut manager = state.lock().await;
            manager.finish_mutation(&first_key);
            manager.finish_mutation(&second_key);
        }

        let mut failed = Vec::new();
        let mut message = String::new();
        for (id, result) in [(first, &result_a), (second, &result_b)] {
            if let Err(err) = result {
                failed.push(id);
                if message.is_empty() {
                    message = err.to_string();
                }
            }
        }

        // The server state moved if even one leg landed, so re-fetch in
        // every case; the failed legs are never silently retried.
        if let Err(err) = self.refresh.execute(page).await {
            warn!(error = %err, "re-fetch after reorder failed");
        }

        if failed.is_empty() {
            info!(first = %first, second = %second, "slides reordered");
            Ok(())
        } else {
            warn!(?failed, message = %message, "reorder partially failed");
            Err(ManagerError::ReorderFailed { failed, message })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mb_core::content::{HeroSlideDraft, HeroSlidePatch, LocalImage, PublishStatus};
    use mb_core::ports::{Page, PreviewStorePort};
    use mb_core::{ApiError, PreviewHandle};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex as StdMutex;

    struct NullPreviewStore;

    impl PreviewStorePort for NullPreviewStore {
        fn register(&self, _image: &LocalImage) -> PreviewHandle {
            PreviewHandle::from_raw(0)
        }
        fn release(&self, _handle: PreviewHandle) {}
        fn live_count(&self) -> usize {
            0
        }
    }

    fn slide(id: i64, serial: &str) -> HeroSlide {
        HeroSlide {
            id: EntityId::new(id),
            title: format!("s{id}"),
            subtitle: String::new(),
            description: "d".into(),
            image: None,
            serial: serial.into(),
            status: PublishStatus::Active,
        }
    }

    /// Applies rank updates to an in-memory slide list; can fail one leg.
    struct SwapApi {
        slides: StdMutex<Vec<HeroSlide>>,
        fail_for: Option<EntityId>,
        update_calls: AtomicUsize,
    }

    #[async_trait]
    impl CollectionApiPort<HeroSlide> for SwapApi {
        async fn list(&self, _page: u32) -> Result<Page<HeroSlide>, ApiError> {
            let mut slides = self.slides.lock().unwrap().clone();
            slides.sort_by(|a, b| a.serial.cmp(&b.serial));
            Ok(Page::single(slides, 10))
        }
        async fn get(&self, _id: EntityId) -> Result<HeroSlide, ApiError> {
            unimplemented!("not used by this test")
        }
        async fn create(
            &self,
            _draft: &HeroSlideDraft,
            _image: Option<&LocalImage>,
        ) -> Result<HeroSlide, ApiError> {
            unimplemented!("not used by this test")
        }
        async fn update(
            &self,
            id: EntityId,
            patch: &HeroSlidePatch,
            _image: Option<&LocalImage>,
        ) -> Result<HeroSlide, ApiError> {
            self.update_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_for == Some(id) {
                return Err(ApiError::Timeout);
            }
            let mut slides = self.slides.lock().unwrap();
            let slot = slides
                .iter_mut()
                .find(|s| s.id == id)
                .ok_or(ApiError::NotFound)?;
            if let Some(serial) = &patch.serial {
                slot.serial = serial.clone();
            }
            Ok(slot.clone())
        }
        async fn delete(&self, _id: EntityId) -> Result<(), ApiError> {
            unimplemented!("not used by this test")
        }
    }

    fn harness(
        api: Arc<SwapApi>,
    ) -> (
        Arc<Mutex<CollectionManager<HeroSlide>>>,
        ReorderSlides,
    ) {
        let state = Arc::new(Mutex::new(
            CollectionManager::<HeroSlide>::with_min_cardinality(Arc::new(NullPreviewStore), 1),
        ));
        {
            let mut manager = state.try_lock().unwrap();
            let slides = api.slides.lock().unwrap().clone();
            manager.ingest_page(Page::single(slides, 10));
        }
        let weak = Arc::downgrade(&state);
        let crud: Arc<dyn CollectionApiPort<HeroSlide>> = api;
        let refresh = RefreshCollection::from_parts(crud.clone(), weak.clone());
        (state.clone(), ReorderSlides::from_parts(crud, weak, refresh))
    }

    #[tokio::test]
    async fn swap_issues_both_updates_and_refetches() {
        let api = Arc::new(SwapApi {
            slides: StdMutex::new(vec![slide(1, "1"), slide(2, "2")]),
            fail_for: None,
            update_calls: AtomicUsize::new(0),
        });
        let (state, reorder) = harness(api.clone());

        reorder
            .execute(EntityId::new(1), EntityId::new(2))
            .await
            .unwrap();

        assert_eq!(api.update_calls.load(Ordering::SeqCst), 2);
        let manager = state.lock().await;
        // after the swap the server orders slide 2 first
        assert_eq!(manager.entities()[0].id, EntityId::new(2));
        assert_eq!(manager.entities()[0].serial, "1");
    }

    #[tokio::test]
    async fn failed_leg_surfaces_one_combined_error_without_crashing() {
        let api = Arc::new(SwapApi {
            slides: StdMutex::new(vec![slide(1, "1"), slide(2, "2")]),
            fail_for: Some(EntityId::new(2)),
            update_calls: AtomicUsize::new(0),
        });
        let (state, reorder) = harness(api.clone());

        let err = reorder
            .execute(EntityId::new(1), EntityId::new(2))
            .await
            .unwrap_err();

        match err {
            ManagerError::ReorderFailed { failed, .. } => {
                assert_eq!(failed, vec![EntityId::new(2)]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        // the transient duplicate rank ("2" on both slides server-side) is
        // tolerated; flags are clear and another attempt is allowed
        let manager = state.lock().await;
        assert!(!manager.is_pending(&MutationKey::Persisted(EntityId::new(1))));
        assert!(!manager.is_pending(&MutationKey::Persisted(EntityId::new(2))));
        let serials: Vec<_> = manager.entities().iter().map(|s| s.serial.clone()).collect();
        assert_eq!(serials.len(), 2);
    }
}
