//! The collection manager and its building blocks.

pub mod delete_flow;
pub mod draft_buffer;
pub mod edit_overlay;
pub mod manager;
pub mod pending;
pub mod view;

pub use delete_flow::DeleteFlow;
pub use draft_buffer::{DraftBuffer, DraftRecord};
pub use edit_overlay::{EditOverlayMap, OverlayRecord};
pub use manager::{CollectionManager, SwapLeg};
pub use pending::{MutationKey, PendingFlags};
pub use view::RenderEntry;
