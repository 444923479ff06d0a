use crate::content::{LocalImage, PreviewHandle};

/// Registry of short-lived local image previews.
///
/// The browser-world analog is `URL.createObjectURL` / `revokeObjectURL`:
/// handles are process-wide resources, so every registered handle must be
/// released on every exit path or the store grows without bound.
pub trait PreviewStorePort: Send + Sync {
    /// Register a preview for a selected file and return its handle.
    fn register(&self, image: &LocalImage) -> PreviewHandle;

    /// Release a handle. Releasing an unknown handle is a no-op.
    fn release(&self, handle: PreviewHandle);

    /// Number of currently live handles.
    fn live_count(&self) -> usize;
}
