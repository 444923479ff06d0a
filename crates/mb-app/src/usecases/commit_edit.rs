use std::sync::{Arc, Weak};

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use mb_core::manager::{CollectionManager, MutationKey};
use mb_core::ports::CollectionApiPort;
use mb_core::{CollectionEntity, EntityId, ManagerError};

use super::refresh_collection::RefreshCollection;

/// Use case for saving the pending edits of one persisted record.
///
/// The update payload carries only the overlay's fields (a true partial
/// patch) plus the staged image, if any. On success the overlay is cleared
/// and the collection re-fetched; on failure the overlay stays so the user
/// can retry. The pending flag is cleared on both paths.
pub struct CommitEdit<E: CollectionEntity> {
    api: Arc<dyn CollectionApiPort<E>>,
    state: Weak<Mutex<CollectionManager<E>>>,
    refresh: RefreshCollection<E>,
}

impl<E: CollectionEntity> CommitEdit<E> {
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
        name = "usecase.commit_edit.execute",
        skip(self),
        fields(resource = E::RESOURCE, id = %id)
    )]
    pub async fn execute(&self, id: EntityId) -> Result<(), ManagerError> {
        let key = MutationKey::Persisted(id);

        let (patch, image, page) = {
            let Some(state) = self.state.upgrade() else {
                return Ok(());
            };
            let mut manager = state.lock().await;
            let (patch, image) = manager.commit_request(id)?;
            if !manager.try_begin_mutation(key.clone()) {
                return Err(ManagerError::MutationInFlight);
            }
            (patch, image, manager.current_page())
        };

        let result = self.api.update(id, &patch, image.as_ref()).await;

        let Some(state) = self.state.upgrade() else {
            debug!(resource = E::RESOURCE, "state gone mid-flight; dropping update result");
            return Ok(());
        };
        {
            let mut manager = state.lock().await;
            manager.finish_mutation(&key);
            if let Ok(updated) = &result {
                manager.finish_edit(id);
                manager.replace_entity(updated.clone());
            }
        }

        match result {
            Ok(_) => {
                info!(resource = E::RESOURCE, id = %id, "record updated");
                if let Err(err) = self.refresh.execute(page).await {
                    warn!(resource = E::RESOURCE, error = %err, "re-fetch after update failed");
                }
                Ok(())
            }
            Err(err) => {
                warn!(resource = E::RESOURCE, id = %id, error = %err, "update failed; edits kept");
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
    use mb_core::{ApiError, PreviewHandle};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
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

    struct RecordingApi {
        update_calls: AtomicUsize,
        last_patch: StdMutex<Option<HeroSlidePatch>>,
        fail_update: AtomicBool,
    }

    impl RecordingApi {
        fn new() -> Self {
            Self {
                update_calls: AtomicUsize::new(0),
                last_patch: StdMutex::new(None),
                fail_update: AtomicBool::new(false),
            }
        }
    }

    fn slide(id: i64, title: &str) -> HeroSlide {
        HeroSlide {
            id: EntityId::new(id),
            title: title.to_string(),
            subtitle: String::new(),
            description: "d".into(),
            image: None,
            serial: "1".into(),
            status: PublishStatus::Active,
        }
    }

    #[async_trait]
    impl CollectionApiPort<HeroSlide> for RecordingApi {
        async fn list(&self, _page: u32) -> Result<Page<HeroSlide>, ApiError> {
            Ok(Page::single(vec![slide(5, "B")], 10))
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
            *self.last_patch.lock().unwrap() = Some(patch.clone());
            if self.fail_update.load(Ordering::SeqCst) {
                return Err(ApiError::Timeout);
            }
            use mb_core::content::EntityPatch;
            Ok(patch.apply_to(&slide(id.into_inner(), "A")))
        }
        async fn delete(&self, _id: EntityId) -> Result<(), ApiError> {
            unimplemented!("not used by this test")
        }
    }

    fn harness(
        api: Arc<RecordingApi>,
        slides: Vec<HeroSlide>,
    ) -> (
        Arc<Mutex<CollectionManager<HeroSlide>>>,
        CommitEdit<HeroSlide>,
    ) {
        let state = Arc::new(Mutex::new(CollectionManager::<HeroSlide>::new(Arc::new(
            NullPreviewStore,
        ))));
        {
            let mut manager = state.try_lock().unwrap();
            manager.ingest_page(Page::single(slides, 10));
        }
        let weak = Arc::downgrade(&state);
        let crud: Arc<dyn CollectionApiPort<HeroSlide>> = api;
        let refresh = RefreshCollection::from_parts(crud.clone(), weak.clone());
        (state.clone(), CommitEdit::from_parts(crud, weak, refresh))
    }

    #[tokio::test]
    async fn commit_sends_only_the_edited_fields() {
        let api = Arc::new(RecordingApi::new());
        let (state, commit) = harness(api.clone(), vec![slide(5, "A")]);
        let id = EntityId::new(5);
        {
            let mut manager = state.lock().await;
            manager.begin_edit(id).unwrap();
            manager.edit_field(id, |p| p.title = Some("B".into()));
        }

        commit.execute(id).await.unwrap();

        let patch = api.last_patch.lock().unwrap().clone().unwrap();
        assert_eq!(patch.title.as_deref(), Some("B"));
        assert!(patch.subtitle.is_none() && patch.description.is_none());
        let manager = state.lock().await;
        assert!(!manager.has_changes(id));
        assert_eq!(manager.editing(), None);
    }

    #[tokio::test]
    async fn clean_overlay_refuses_to_save() {
        let api = Arc::new(RecordingApi::new());
        let (state, commit) = harness(api.clone(), vec![slide(5, "A")]);
        let id = EntityId::new(5);
        state.lock().await.begin_edit(id).unwrap();

        let err = commit.execute(id).await.unwrap_err();
        assert_eq!(err, ManagerError::NothingToSave);
        assert_eq!(api.update_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failed_update_keeps_the_overlay_for_retry() {
        let api = Arc::new(RecordingApi::new());
        api.fail_update.store(true, Ordering::SeqCst);
        let (state, commit) = harness(api.clone(), vec![slide(5, "A")]);
        let id = EntityId::new(5);
        {
            let mut manager = state.lock().await;
            manager.begin_edit(id).unwrap();
            manager.edit_field(id, |p| p.title = Some("B".into()));
        }

        let err = commit.execute(id).await.unwrap_err();
        assert_eq!(err, ManagerError::Api(ApiError::Timeout));
        let manager = state.lock().await;
        assert!(manager.has_changes(id));
        assert!(!manager.is_pending(&MutationKey::Persisted(id)));
        assert_eq!(manager.resolved(id).unwrap().title, "B");
    }

    #[tokio::test]
    async fn double_commit_is_blocked_by_the_pending_flag() {
        let api = Arc::new(RecordingApi::new());
        let (state, commit) = harness(api.clone(), vec![slide(5, "A")]);
        let id = EntityId::new(5);
        {
            let mut manager = state.lock().await;
            manager.begin_edit(id).unwrap();
            manager.edit_field(id, |p| p.title = Some("B".into()));
            // simulate an in-flight mutation for the same record
            assert!(manager.try_begin_mutation(MutationKey::Persisted(id)));
        }

        let err = commit.execute(id).await.unwrap_err();
        assert_eq!(err, ManagerError::MutationInFlight);
        assert_eq!(api.update_calls.load(Ordering::SeqCst), 0);
    }
}
