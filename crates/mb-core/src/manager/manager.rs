//! The collection manager: local pending state for one remote collection.
//!
//! Owns the draft buffer, edit overlays, pending flags, the single inline
//! edit selection and the delete confirmation flow. Everything here is a
//! synchronous state transition; network dispatch lives in the `mb-app`
//! use cases, which hold the manager behind a `tokio::sync::Mutex` and
//! never keep the lock across an await.

use std::sync::Arc;

use tracing::debug;

use crate::content::{
    CollectionEntity, EntityDraft, ImageRef, ImageSource, LocalImage, PreviewHandle, RankOrdered,
};
use crate::error::{ManagerError, ValidationError};
use crate::ids::{DraftId, EntityId};
use crate::manager::delete_flow::DeleteFlow;
use crate::manager::draft_buffer::{DraftBuffer, DraftRecord};
use crate::manager::edit_overlay::{EditOverlayMap, OverlayRecord};
use crate::manager::pending::{MutationKey, PendingFlags};
use crate::manager::view::RenderEntry;
use crate::ports::{Page, PageInfo, PreviewStorePort};

/// One leg of a rank swap: the target record and the patch that rewrites
/// its rank.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapLeg<E: CollectionEntity> {
    pub id: EntityId,
    pub patch: E::Patch,
}

pub struct CollectionManager<E: CollectionEntity> {
    collection: Vec<E>,
    page_info: Option<PageInfo>,
    drafts: DraftBuffer<E>,
    overlays: EditOverlayMap<E>,
    editing: Option<EntityId>,
    pending: PendingFlags,
    delete_flow: DeleteFlow,
    min_keep: usize,
    previews: Arc<dyn PreviewStorePort>,
}

impl<E: CollectionEntity> CollectionManager<E> {
    pub fn new(previews: Arc<dyn PreviewStorePort>) -> Self {
        Self::with_min_cardinality(previews, 0)
    }

    /// A manager for a collection that must always keep `min_keep`
    /// records (the hero slider keeps at least one slide).
    pub fn with_min_cardinality(previews: Arc<dyn PreviewStorePort>, min_keep: usize) -> Self {
        Self {
            collection: Vec::new(),
            page_info: None,
            drafts: DraftBuffer::new(),
            overlays: EditOverlayMap::new(),
            editing: None,
            pending: PendingFlags::new(),
            delete_flow: DeleteFlow::default(),
            min_keep,
            previews,
        }
    }

    // ----- authoritative collection -----

    pub fn entities(&self) -> &[E] {
        &self.collection
    }

    pub fn page_info(&self) -> Option<&PageInfo> {
        self.page_info.as_ref()
    }

    pub fn current_page(&self) -> u32 {
        self.page_info.as_ref().map_or(1, |p| p.current_page)
    }

    pub fn find(&self, id: EntityId) -> Option<&E> {
        self.collection.iter().find(|e| e.id() == id)
    }

    /// Replace local state with a freshly fetched page.
    ///
    /// The fetched data is authoritative: every overlay is discarded so no
    /// stale edit survives a server-state refresh. Drafts are untouched;
    /// they do not exist server-side yet.
    pub fn ingest_page(&mut self, page: Page<E>) {
        for record in self.overlays.drain_all() {
            self.release_overlay_preview(record);
        }
        self.editing = None;
        debug!(
            resource = E::RESOURCE,
            records = page.data.len(),
            page = page.pagination.current_page,
            "ingested collection page"
        );
        self.collection = page.data;
        self.page_info = Some(page.pagination);
    }

    /// Swap a single record in place after a row-level mutation response,
    /// without waiting for the next full re-fetch.
    pub fn replace_entity(&mut self, entity: E) {
        if let Some(slot) = self.collection.iter_mut().find(|e| e.id() == entity.id()) {
            *slot = entity;
        }
    }

    // ----- draft buffer -----

    /// Start composing a new record. Always succeeds.
    pub fn add_draft(&mut self) -> DraftId {
        self.drafts.add()
    }

    pub fn draft(&self, id: &DraftId) -> Option<&DraftRecord<E>> {
        self.drafts.get(id)
    }

    pub fn draft_count(&self) -> usize {
        self.drafts.len()
    }

    /// Mutate one or more fields of a draft. No-op when the draft is
    /// unknown; returns whether anything was touched.
    pub fn update_draft(&mut self, id: &DraftId, f: impl FnOnce(&mut E::Draft)) -> bool {
        self.drafts.update_fields(id, f)
    }

    /// Attach a locally selected image to a draft, registering a preview
    /// and releasing the previous one.
    pub fn set_draft_image(
        &mut self,
        id: &DraftId,
        image: LocalImage,
    ) -> Result<PreviewHandle, ManagerError> {
        if !self.drafts.contains(id) {
            return Err(ManagerError::UnknownDraft(id.clone()));
        }
        let handle = self.previews.register(&image);
        if let Some(replaced) = self.drafts.set_image(id, image, handle) {
            self.previews.release(replaced);
        }
        Ok(handle)
    }

    /// Drop a draft and release its preview. Idempotent.
    pub fn remove_draft(&mut self, id: &DraftId) {
        if let Some(record) = self.drafts.remove(id) {
            if let Some(handle) = record.preview {
                self.previews.release(handle);
            }
        }
    }

    /// Client-side validation gate for `submit_draft`: required fields
    /// must be non-empty and, where the collection carries one, an image
    /// must be chosen. No network call is ever made for an invalid draft.
    pub fn validate_draft(&self, id: &DraftId) -> Result<(), ManagerError> {
        let record = self
            .drafts
            .get(id)
            .ok_or_else(|| ManagerError::UnknownDraft(id.clone()))?;
        let empty_fields = record.fields.empty_required_fields();
        let missing_image = E::Draft::requires_image() && record.image.is_none();
        if empty_fields.is_empty() && !missing_image {
            Ok(())
        } else {
            Err(ValidationError {
                empty_fields,
                missing_image,
            }
            .into())
        }
    }

    // ----- edit overlay -----

    /// Open an entity for inline editing.
    ///
    /// Only one record is editable at a time per screen, so any previous
    /// overlay is cancelled first.
    pub fn begin_edit(&mut self, id: EntityId) -> Result<(), ManagerError> {
        if self.find(id).is_none() {
            return Err(ManagerError::UnknownEntity(id));
        }
        if let Some(previous) = self.editing {
            if previous != id {
                self.cancel_edit(previous);
            }
        }
        if let Some(replaced) = self.overlays.begin(id) {
            self.release_overlay_preview(replaced);
        }
        self.editing = Some(id);
        Ok(())
    }

    pub fn editing(&self) -> Option<EntityId> {
        self.editing
    }

    pub fn overlay(&self, id: EntityId) -> Option<&OverlayRecord<E>> {
        self.overlays.get(id)
    }

    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    /// Write fields into the overlay for `id`. No-op when no edit is open
    /// for it; returns whether anything was written.
    pub fn edit_field(&mut self, id: EntityId, f: impl FnOnce(&mut E::Patch)) -> bool {
        match self.overlays.get_mut(id) {
            Some(record) => {
                f(&mut record.patch);
                true
            }
            None => false,
        }
    }

    /// Stage a replacement image for an entity under edit.
    pub fn set_edit_image(
        &mut self,
        id: EntityId,
        image: LocalImage,
    ) -> Result<PreviewHandle, ManagerError> {
        if self.overlays.get(id).is_none() {
            return Err(ManagerError::UnknownEntity(id));
        }
        let handle = self.previews.register(&image);
        let replaced = match self.overlays.get_mut(id) {
            Some(record) => {
                let replaced = record.preview.take();
                record.image = Some(image);
                record.preview = Some(handle);
                replaced
            }
            None => None,
        };
        if let Some(replaced) = replaced {
            self.previews.release(replaced);
        }
        Ok(handle)
    }

    /// Whether saving `id` now would change anything.
    pub fn has_changes(&self, id: EntityId) -> bool {
        match (self.overlays.get(id), self.find(id)) {
            (Some(overlay), Some(persisted)) => overlay.has_changes(persisted),
            _ => false,
        }
    }

    /// The merged projection of `id`: overlay fields win, the persisted
    /// record fills the rest. This is the single read path for rendering.
    pub fn resolved(&self, id: EntityId) -> Option<E> {
        let persisted = self.find(id)?;
        match self.overlays.get(id) {
            Some(overlay) => Some(overlay.resolved(persisted)),
            None => Some(persisted.clone()),
        }
    }

    /// The image that would be persisted if `id` were saved right now:
    /// a staged local file wins over the stored remote URL.
    pub fn resolved_image(&self, id: EntityId) -> Option<ImageSource> {
        if let Some(overlay) = self.overlays.get(id) {
            if let Some(image) = &overlay.image {
                return Some(ImageSource::Local(image.clone()));
            }
        }
        self.find(id)
            .and_then(|e| e.image_url())
            .map(|url| ImageSource::Remote(url.to_string()))
    }

    /// Discard pending edits for `id` and close the inline editor if it
    /// was the one open.
    pub fn cancel_edit(&mut self, id: EntityId) {
        if let Some(record) = self.overlays.remove(id) {
            self.release_overlay_preview(record);
        }
        if self.editing == Some(id) {
            self.editing = None;
        }
    }

    /// Snapshot the overlay for an update mutation, without clearing it.
    /// Fails when there is nothing worth saving.
    pub fn commit_request(&self, id: EntityId) -> Result<(E::Patch, Option<LocalImage>), ManagerError> {
        let persisted = self.find(id).ok_or(ManagerError::UnknownEntity(id))?;
        let overlay = self.overlays.get(id).ok_or(ManagerError::NothingToSave)?;
        if !overlay.has_changes(persisted) {
            return Err(ManagerError::NothingToSave);
        }
        Ok((overlay.patch.clone(), overlay.image.clone()))
    }

    /// Clear the overlay after a successful update.
    pub fn finish_edit(&mut self, id: EntityId) {
        self.cancel_edit(id);
    }

    // ----- pending flags -----

    pub fn is_pending(&self, key: &MutationKey) -> bool {
        self.pending.is_pending(key)
    }

    pub fn try_begin_mutation(&mut self, key: MutationKey) -> bool {
        self.pending.try_mark(key)
    }

    pub fn finish_mutation(&mut self, key: &MutationKey) {
        self.pending.clear(key);
    }

    // ----- delete flow -----

    /// Ask for confirmation before deleting `id`.
    ///
    /// Never opens the prompt when deleting would leave the collection
    /// below its minimum cardinality.
    pub fn request_delete(&mut self, id: EntityId) -> Result<(), ManagerError> {
        if self.find(id).is_none() {
            return Err(ManagerError::UnknownEntity(id));
        }
        if self.min_keep > 0 && self.collection.len() <= self.min_keep {
            return Err(ManagerError::MinimumCardinality { min: self.min_keep });
        }
        self.delete_flow.request(id);
        Ok(())
    }

    pub fn delete_candidate(&self) -> Option<EntityId> {
        self.delete_flow.candidate()
    }

    pub fn delete_prompt_open(&self) -> bool {
        self.delete_flow.is_open()
    }

    /// Consume the candidate on confirmation; the prompt closes whatever
    /// the mutation outcome.
    pub fn take_delete_candidate(&mut self) -> Option<EntityId> {
        self.delete_flow.take()
    }

    pub fn dismiss_delete(&mut self) {
        self.delete_flow.dismiss();
    }

    // ----- reconciliation view -----

    /// The render-ready list: drafts first in creation order, then
    /// persisted entities in server order, merged with their overlays.
    pub fn render_entries(&self) -> Vec<RenderEntry<E>> {
        let mut entries = Vec::with_capacity(self.drafts.len() + self.collection.len());
        for draft in self.drafts.iter() {
            entries.push(RenderEntry::Draft {
                id: draft.id.clone(),
                fields: draft.fields.clone(),
                image: ImageRef::from_parts(draft.preview, None),
                pending: self
                    .pending
                    .is_pending(&MutationKey::Draft(draft.id.clone())),
            });
        }
        for persisted in &self.collection {
            let id = persisted.id();
            let overlay = self.overlays.get(id);
            let entity = overlay
                .map(|o| o.resolved(persisted))
                .unwrap_or_else(|| persisted.clone());
            let preview = overlay.and_then(|o| o.preview);
            let image = ImageRef::from_parts(preview, entity.image_url());
            entries.push(RenderEntry::Persisted {
                image,
                editing: self.editing == Some(id),
                dirty: overlay.is_some_and(|o| o.has_changes(persisted)),
                pending: self.pending.is_pending(&MutationKey::Persisted(id)),
                entity,
            });
        }
        entries
    }

    // ----- teardown -----

    /// Drop all local state and release every preview handle. Called on
    /// screen teardown; also runs on drop.
    pub fn reset(&mut self) {
        for record in self.drafts.drain_all() {
            if let Some(handle) = record.preview {
                self.previews.release(handle);
            }
        }
        for record in self.overlays.drain_all() {
            self.release_overlay_preview(record);
        }
        self.editing = None;
        self.delete_flow.dismiss();
        self.pending.clear_all();
    }

    fn release_overlay_preview(&self, record: OverlayRecord<E>) {
        if let Some(handle) = record.preview {
            self.previews.release(handle);
        }
    }
}

impl<E: RankOrdered> CollectionManager<E> {
    /// Build the two legs of an adjacent-rank swap.
    ///
    /// Each leg patches only the rank field; the caller issues both
    /// updates concurrently and treats them as one logical operation.
    pub fn swap_rank_legs(
        &self,
        first: EntityId,
        second: EntityId,
    ) -> Result<(SwapLeg<E>, SwapLeg<E>), ManagerError> {
        let a = self.find(first).ok_or(ManagerError::UnknownEntity(first))?;
        let b = self
            .find(second)
            .ok_or(ManagerError::UnknownEntity(second))?;
        Ok((
            SwapLeg {
                id: first,
                patch: E::rank_patch(b.rank().to_string()),
            },
            SwapLeg {
                id: second,
                patch: E::rank_patch(a.rank().to_string()),
            },
        ))
    }
}

impl<E: CollectionEntity> Drop for CollectionManager<E> {
    fn drop(&mut self) {
        self.reset();
    }
}
