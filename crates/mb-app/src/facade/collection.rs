//! Per-resource facade: one admin screen's worth of state and actions.

use std::sync::Arc;

use tokio::sync::Mutex;

use mb_core::manager::{CollectionManager, RenderEntry};
use mb_core::ports::{CollectionApiPort, PageInfo, PreviewStorePort};
use mb_core::{
    CollectionEntity, DraftId, EntityId, LocalImage, ManagerError, PreviewHandle,
};

use crate::usecases::{CommitEdit, ConfirmDelete, RefreshCollection, SubmitDraft};

/// Bundles the shared manager state with the use cases acting on it.
///
/// This is the surface an admin screen talks to; every method takes the
/// state lock only for the duration of a synchronous transition.
pub struct CollectionFacade<E: CollectionEntity> {
    state: Arc<Mutex<CollectionManager<E>>>,
    refresh: RefreshCollection<E>,
    submit: SubmitDraft<E>,
    commit: CommitEdit<E>,
    delete: ConfirmDelete<E>,
}

impl<E: CollectionEntity> CollectionFacade<E> {
    pub fn from_parts(
        api: Arc<dyn CollectionApiPort<E>>,
        previews: Arc<dyn PreviewStorePort>,
        min_keep: usize,
    ) -> Self {
        let state = Arc::new(Mutex::new(CollectionManager::with_min_cardinality(
            previews, min_keep,
        )));
        let weak = Arc::downgrade(&state);
        let refresh = RefreshCollection::from_parts(api.clone(), weak.clone());
        let submit = SubmitDraft::from_parts(api.clone(), weak.clone(), refresh.clone());
        let commit = CommitEdit::from_parts(api.clone(), weak.clone(), refresh.clone());
        let delete = ConfirmDelete::from_parts(api, weak, refresh.clone());
        Self {
            state,
            refresh,
            submit,
            commit,
            delete,
        }
    }

    /// Shared manager state, for wiring resource-specific actions onto the
    /// same screen (see the hero panel).
    pub fn state(&self) -> &Arc<Mutex<CollectionManager<E>>> {
        &self.state
    }

    // ----- reads -----

    pub async fn render_entries(&self) -> Vec<RenderEntry<E>> {
        self.state.lock().await.render_entries()
    }

    pub async fn entities(&self) -> Vec<E> {
        self.state.lock().await.entities().to_vec()
    }

    pub async fn page_info(&self) -> Option<PageInfo> {
        self.state.lock().await.page_info().cloned()
    }

    pub async fn has_changes(&self, id: EntityId) -> bool {
        self.state.lock().await.has_changes(id)
    }

    pub async fn resolved(&self, id: EntityId) -> Option<E> {
        self.state.lock().await.resolved(id)
    }

    // ----- collection -----

    pub async fn refresh(&self, page: u32) -> Result<(), ManagerError> {
        self.refresh.execute(page).await
    }

    // ----- drafts -----

    pub async fn add_draft(&self) -> DraftId {
        self.state.lock().await.add_draft()
    }

    pub async fn update_draft<F>(&self, id: &DraftId, f: F) -> bool
    where
        F: FnOnce(&mut E::Draft) + Send,
    {
        self.state.lock().await.update_draft(id, f)
    }

    pub async fn set_draft_image(
        &self,
        id: &DraftId,
        image: LocalImage,
    ) -> Result<PreviewHandle, ManagerError> {
        self.state.lock().await.set_draft_image(id, image)
    }

    pub async fn remove_draft(&self, id: &DraftId) {
        self.state.lock().await.remove_draft(id)
    }

    pub async fn submit_draft(&self, id: &DraftId) -> Result<(), ManagerError> {
        self.submit.execute(id).await
    }

    // ----- inline editing -----

    pub async fn begin_edit(&self, id: EntityId) -> Result<(), ManagerError> {
        self.state.lock().await.begin_edit(id)
    }

    pub async fn edit_field<F>(&self, id: EntityId, f: F) -> bool
    where
        F: FnOnce(&mut E::Patch) + Send,
    {
        self.state.lock().await.edit_field(id, f)
    }

    pub async fn set_edit_image(
        &self,
        id: EntityId,
        image: LocalImage,
    ) -> Result<PreviewHandle, ManagerError> {
        self.state.lock().await.set_edit_image(id, image)
    }

    pub async fn cancel_edit(&self, id: EntityId) {
        self.state.lock().await.cancel_edit(id)
    }

    pub async fn save_edit(&self, id: EntityId) -> Result<(), ManagerError> {
        self.commit.execute(id).await
    }

    // ----- deletion -----

    pub async fn request_delete(&self, id: EntityId) -> Result<(), ManagerError> {
        self.state.lock().await.request_delete(id)
    }

    pub async fn delete_candidate(&self) -> Option<EntityId> {
        self.state.lock().await.delete_candidate()
    }

    pub async fn confirm_delete(&self) -> Result<(), ManagerError> {
        self.delete.execute().await
    }

    pub async fn dismiss_delete(&self) {
        self.state.lock().await.dismiss_delete()
    }

    // ----- teardown -----

    /// Drop all local state and release every preview handle.
    pub async fn teardown(&self) {
        self.state.lock().await.reset()
    }
}
