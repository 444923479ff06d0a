//! In-memory preview-handle registry.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use tracing::trace;

use mb_core::content::{LocalImage, PreviewHandle};
use mb_core::ports::PreviewStorePort;

/// Process-local preview store.
///
/// Hands out sequential handles and remembers the file name behind each
/// one so a renderer can resolve a pseudo-URL for display. The live count
/// is the leak detector: it must return to zero once every draft and
/// overlay is gone.
#[derive(Default)]
pub struct InMemoryPreviewStore {
    next: AtomicU64,
    live: Mutex<HashMap<u64, String>>,
}

impl InMemoryPreviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pseudo-URL for a live handle, `None` once released.
    pub fn preview_url(&self, handle: PreviewHandle) -> Option<String> {
        self.live
            .lock()
            .ok()?
            .get(&handle.raw())
            .map(|name| format!("preview://{}/{}", handle.raw(), name))
    }
}

impl PreviewStorePort for InMemoryPreviewStore {
    fn register(&self, image: &LocalImage) -> PreviewHandle {
        let id = self.next.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut live) = self.live.lock() {
            live.insert(id, image.file_name.clone());
        }
        trace!(handle = id, file = %image.file_name, "registered preview");
        PreviewHandle::from_raw(id)
    }

    fn release(&self, handle: PreviewHandle) {
        if let Ok(mut live) = self.live.lock() {
            live.remove(&handle.raw());
        }
        trace!(handle = handle.raw(), "released preview");
    }

    fn live_count(&self) -> usize {
        self.live.lock().map(|live| live.len()).unwrap_or(0)
    }
}
