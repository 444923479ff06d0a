use std::sync::{Arc, Weak};

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use mb_core::manager::{CollectionManager, MutationKey};
use mb_core::ports::CollectionApiPort;
use mb_core::{CollectionEntity, DraftId, ManagerError};

use super::refresh_collection::RefreshCollection;

/// Use case for submitting a draft as a create mutation.
///
/// Validation runs first and an invalid draft never reaches the network.
/// On success the draft is removed and the collection re-fetched; on
/// failure the draft stays in the buffer so the user can retry without
/// re-entering anything. The pending flag is cleared on both paths.
pub struct SubmitDraft<E: CollectionEntity> {
    api: Arc<dyn CollectionApiPort<E>>,
    state: Weak<Mutex<CollectionManager<E>>>,
    refresh: RefreshCollection<E>,
}

impl<E: CollectionEntity> SubmitDraft<E> {
    pub fn from_parts(
        api: Arc<dyn CollectionApiPort<E>>,
        state: Weak<Mutex<CollectionManager<E>>>,
        refresh: RefreshCollection<E>,
    ) -> Self {
        Self {
            api,
            state,
            refresh,
        }
    }

    #[tracing::instrument(
        name = "usecase.submit_draft.execute",
        skip(self),
        fields(resource = E::RESOURCE, draft = %draft_id)
    )]
    pub async fn execute(&self, draft_id: &DraftId) -> Result<(), ManagerError> {
        let key = MutationKey::Draft(draft_id.clone());

        // Validate and mark pending under the lock; the lock is never held
        // across the network call.
        let (fields, image, page) = {
            let Some(state) = self.state.upgrade() else {
                return Ok(());
            };
            let mut manager = state.lock().await;
            manager.validate_draft(draft_id)?;
            let record = manager
                .draft(draft_id)
                .ok_or_else(|| ManagerError::UnknownDraft(draft_id.clone()))?;
            let fields = record.fields.clone();
            let image = record.image.clone();
            if !manager.try_begin_mutation(key.clone()) {
                return Err(ManagerError::MutationInFlight);
            }
            (fields, image, manager.current_page())
        };

        let result = self.api.create(&fields, image.as_ref()).await;

        let Some(state) = self.state.upgrade() else {
            debug!(resource = E::RESOURCE, "state gone mid-flight; dropping create result");
            return Ok(());
        };
        {
            let mut manager = state.lock().await;
            manager.finish_mutation(&key);
            if result.is_ok() {
                manager.remove_draft(draft_id);
            }
        }

        match result {
            Ok(created) => {
                info!(resource = E::RESOURCE, id = %created.id(), "record created");
                if let Err(err) = self.refresh.execute(page).await {
                    warn!(resource = E::RESOURCE, error = %err, "re-fetch after create failed");
                }
                Ok(())
            }
            Err(err) => {
                warn!(resource = E::RESOURCE, error = %err, "create failed; draft kept for retry");
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mb_core::content::{HeroSlide, HeroSlideDraft, HeroSlidePatch, LocalImage, PublishStatus};
    use mb_core::ports::{Page, PreviewStorePort};
    use mb_core::{ApiError, EntityId, PreviewHandle};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

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

    /// Records create/list calls; optionally fails the create.
    struct RecordingApi {
        create_calls: AtomicUsize,
        list_calls: AtomicUsize,
        fail_create: AtomicBool,
    }

    impl RecordingApi {
        fn new() -> Self {
            Self {
                create_calls: AtomicUsize::new(0),
                list_calls: AtomicUsize::new(0),
                fail_create: AtomicBool::new(false),
            }
        }

        fn created(&self) -> HeroSlide {
            HeroSlide {
                id: EntityId::new(10),
                title: "Summer Offer".into(),
                subtitle: String::new(),
                description: "20% off".into(),
                image: Some("https://cdn.example/10.png".into()),
                serial: "1".into(),
                status: PublishStatus::Inactive,
            }
        }
    }

    #[async_trait]
    impl CollectionApiPort<HeroSlide> for RecordingApi {
        async fn list(&self, _page: u32) -> Result<Page<HeroSlide>, ApiError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            Ok(Page::single(vec![self.created()], 10))
        }
        async fn get(&self, _id: EntityId) -> Result<HeroSlide, ApiError> {
            unimplemented!("not used by this test")
        }
        async fn create(
            &self,
            _draft: &HeroSlideDraft,
            image: Option<&LocalImage>,
        ) -> Result<HeroSlide, ApiError> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            assert!(image.is_some(), "hero creates always carry an image");
            if self.fail_create.load(Ordering::SeqCst) {
                Err(ApiError::Network("connection reset".into()))
            } else {
                Ok(self.created())
            }
        }
        async fn update(
            &self,
            _id: EntityId,
            _patch: &HeroSlidePatch,
            _image: Option<&LocalImage>,
        ) -> Result<HeroSlide, ApiError> {
            unimplemented!("not used by this test")
        }
        async fn delete(&self, _id: EntityId) -> Result<(), ApiError> {
            unimplemented!("not used by this test")
        }
    }

    fn harness(
        api: Arc<RecordingApi>,
    ) -> (
        Arc<Mutex<CollectionManager<HeroSlide>>>,
        SubmitDraft<HeroSlide>,
    ) {
        let state = Arc::new(Mutex::new(CollectionManager::<HeroSlide>::new(Arc::new(
            NullPreviewStore,
        ))));
        let weak = Arc::downgrade(&state);
        let crud: Arc<dyn CollectionApiPort<HeroSlide>> = api;
        let refresh = RefreshCollection::from_parts(crud.clone(), weak.clone());
        (state.clone(), SubmitDraft::from_parts(crud, weak, refresh))
    }

    fn png() -> LocalImage {
        LocalImage::new("s.png", "image/png", vec![1u8])
    }

    #[tokio::test]
    async fn invalid_draft_never_reaches_the_network() {
        let api = Arc::new(RecordingApi::new());
        let (state, submit) = harness(api.clone());
        let draft_id = {
            let mut manager = state.lock().await;
            let id = manager.add_draft();
            manager.update_draft(&id, |d| d.title = "Summer Offer".into());
            id
        };

        let err = submit.execute(&draft_id).await.unwrap_err();
        assert!(matches!(err, ManagerError::Validation(_)));
        assert_eq!(api.create_calls.load(Ordering::SeqCst), 0);
        // draft is still there for the user to finish
        assert!(state.lock().await.draft(&draft_id).is_some());
    }

    #[tokio::test]
    async fn successful_submit_removes_the_draft_and_refetches() {
        let api = Arc::new(RecordingApi::new());
        let (state, submit) = harness(api.clone());
        let draft_id = {
            let mut manager = state.lock().await;
            let id = manager.add_draft();
            manager.update_draft(&id, |d| {
                d.title = "Summer Offer".into();
                d.description = "20% off".into();
            });
            manager.set_draft_image(&id, png()).unwrap();
            id
        };

        submit.execute(&draft_id).await.unwrap();
        assert_eq!(api.create_calls.load(Ordering::SeqCst), 1);
        assert_eq!(api.list_calls.load(Ordering::SeqCst), 1);
        let manager = state.lock().await;
        assert!(manager.draft(&draft_id).is_none());
        assert_eq!(manager.entities().len(), 1);
    }

    #[tokio::test]
    async fn failed_submit_keeps_the_draft_and_clears_the_pending_flag() {
        let api = Arc::new(RecordingApi::new());
        api.fail_create.store(true, Ordering::SeqCst);
        let (state, submit) = harness(api.clone());
        let draft_id = {
            let mut manager = state.lock().await;
            let id = manager.add_draft();
            manager.update_draft(&id, |d| {
                d.title = "Summer Offer".into();
                d.description = "20% off".into();
            });
            manager.set_draft_image(&id, png()).unwrap();
            id
        };

        let err = submit.execute(&draft_id).await.unwrap_err();
        assert!(matches!(err, ManagerError::Api(ApiError::Network(_))));
        let manager = state.lock().await;
        assert!(manager.draft(&draft_id).is_some());
        assert!(!manager.is_pending(&MutationKey::Draft(draft_id.clone())));
        // retry goes through once the network is back
        drop(manager);
        api.fail_create.store(false, Ordering::SeqCst);
        submit.execute(&draft_id).await.unwrap();
        assert_eq!(api.create_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn teardown_before_dispatch_is_ignored() {
        let api = Arc::new(RecordingApi::new());
        let (state, submit) = harness(api.clone());
        let draft_id = {
            let mut manager = state.lock().await;
            let id = manager.add_draft();
            manager.update_draft(&id, |d| {
                d.title = "t".into();
                d.description = "d".into();
            });
            manager.set_draft_image(&id, png()).unwrap();
            id
        };
        drop(state);
        // the weak upgrade fails and the result is dropped, not an error
        assert!(submit.execute(&draft_id).await.is_ok());
    }
}
