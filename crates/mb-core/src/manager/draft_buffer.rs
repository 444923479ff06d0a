//! Buffer of client-only drafts awaiting submission.

use crate::content::{CollectionEntity, LocalImage, PreviewHandle};
use crate::ids::DraftId;

/// One unsaved draft plus its locally selected image, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftRecord<E: CollectionEntity> {
    pub id: DraftId,
    pub fields: E::Draft,
    pub image: Option<LocalImage>,
    pub preview: Option<PreviewHandle>,
}

/// Ordered list of drafts, oldest first.
///
/// The buffer owns draft state only; preview handles are registered and
/// released by the manager, which owns the preview store. Methods that
/// detach a handle return it so the caller can release it.
#[derive(Debug)]
pub struct DraftBuffer<E: CollectionEntity> {
    drafts: Vec<DraftRecord<E>>,
}

impl<E: CollectionEntity> DraftBuffer<E> {
    pub fn new() -> Self {
        Self { drafts: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DraftRecord<E>> {
        self.drafts.iter()
    }

    pub fn contains(&self, id: &DraftId) -> bool {
        self.drafts.iter().any(|d| d.id == *id)
    }

    pub fn get(&self, id: &DraftId) -> Option<&DraftRecord<E>> {
        self.drafts.iter().find(|d| d.id == *id)
    }

    /// Append a fresh draft with default fields and return its id.
    pub fn add(&mut self) -> DraftId {
        let id = DraftId::new();
        self.drafts.push(DraftRecord {
            id: id.clone(),
            fields: E::Draft::default(),
            image: None,
            preview: None,
        });
        id
    }

    /// Apply a field mutation to the draft. No-op when the id is unknown;
    /// returns whether a draft was touched.
    pub fn update_fields(&mut self, id: &DraftId, f: impl FnOnce(&mut E::Draft)) -> bool {
        match self.drafts.iter_mut().find(|d| d.id == *id) {
            Some(record) => {
                f(&mut record.fields);
                true
            }
            None => false,
        }
    }

    /// Attach an image and its preview handle, returning the handle that
    /// was replaced (the caller releases it).
    pub fn set_image(
        &mut self,
        id: &DraftId,
        image: LocalImage,
        preview: PreviewHandle,
    ) -> Option<PreviewHandle> {
        let record = self.drafts.iter_mut().find(|d| d.id == *id)?;
        let replaced = record.preview.take();
        record.image = Some(image);
        record.preview = Some(preview);
        replaced
    }

    /// Remove the draft, returning it (with its preview handle) for
    /// cleanup. Idempotent.
    pub fn remove(&mut self, id: &DraftId) -> Option<DraftRecord<E>> {
        let index = self.drafts.iter().position(|d| d.id == *id)?;
        Some(self.drafts.remove(index))
    }

    /// Drain every draft, for teardown.
    pub fn drain_all(&mut self) -> Vec<DraftRecord<E>> {
        std::mem::take(&mut self.drafts)
    }
}
