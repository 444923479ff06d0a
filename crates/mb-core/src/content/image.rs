//! Image handling: the file-vs-URL duality and local preview handles.

use bytes::Bytes;

/// A locally selected image file that has not been uploaded yet.
///
/// Distinct from any server URL; it is only ever turned into a multipart
/// field of a create/update mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalImage {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl LocalImage {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Where a record's image comes from.
///
/// Keeping this a tagged union makes the resolution logic (which one to
/// send, which one to preview) exhaustive instead of stringly-typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Server-hosted asset addressed by URL.
    Remote(String),
    /// Locally selected file awaiting upload.
    Local(LocalImage),
}

impl ImageSource {
    pub fn as_local(&self) -> Option<&LocalImage> {
        match self {
            ImageSource::Local(image) => Some(image),
            ImageSource::Remote(_) => None,
        }
    }

    pub fn as_remote_url(&self) -> Option<&str> {
        match self {
            ImageSource::Remote(url) => Some(url),
            ImageSource::Local(_) => None,
        }
    }
}

/// Handle to a short-lived local preview of a selected image.
///
/// Issued by a `PreviewStorePort` and must be released on every exit path
/// (submit success, cancel, removal, teardown); holding one past release is
/// a logic error, not a memory-safety hazard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PreviewHandle(u64);

impl PreviewHandle {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PreviewHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "preview#{}", self.0)
    }
}

/// Render-ready image reference with placeholder fallback.
///
/// The single read path the view layer uses: a pending local preview always
/// wins over the persisted URL, and a missing or broken asset degrades to
/// the placeholder instead of failing the render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    /// Local preview of a selected-but-unsubmitted file.
    Preview(PreviewHandle),
    /// Remote asset URL.
    Url(String),
    /// Fallback asset for records without an image (or whose image failed
    /// to load).
    Placeholder,
}

impl ImageRef {
    /// Resolve the displayed image from pending-preview and persisted-URL
    /// parts.
    pub fn from_parts(preview: Option<PreviewHandle>, url: Option<&str>) -> Self {
        if let Some(handle) = preview {
            return ImageRef::Preview(handle);
        }
        match url {
            Some(url) if !url.is_empty() => ImageRef::Url(url.to_string()),
            _ => ImageRef::Placeholder,
        }
    }
}
