//! Traits every managed collection type implements.
//!
//! A collection is described by three types: the persisted entity (server
//! owned), its draft (client-only candidate for creation) and its patch
//! (sparse pending-edit overlay). The collection manager and the REST
//! adapter are generic over these.

use serde::Serialize;

use crate::ids::EntityId;

/// Client-side candidate for a create mutation.
///
/// Mirrors the persisted entity minus the identifier. The image file, if
/// the collection has one, is tracked next to the draft by the buffer, not
/// inside it.
pub trait EntityDraft:
    Default + Clone + std::fmt::Debug + PartialEq + Serialize + Send + Sync + 'static
{
    /// Names of required fields that are currently empty.
    ///
    /// An empty result means the draft passes client-side validation
    /// (except for the image requirement, checked by the buffer).
    fn empty_required_fields(&self) -> Vec<&'static str>;

    /// Whether submission requires a chosen image file.
    fn requires_image() -> bool {
        true
    }
}

/// Sparse set of pending field edits for one persisted entity.
///
/// Every field is optional; serialization omits unset fields so an update
/// mutation carries a true partial patch, never stale copies of unedited
/// values.
pub trait EntityPatch:
    Default + Clone + std::fmt::Debug + PartialEq + Serialize + Send + Sync + 'static
{
    type Entity;

    /// True when no field has been set.
    fn is_empty(&self) -> bool;

    /// True when at least one set field differs from the persisted value.
    fn differs_from(&self, persisted: &Self::Entity) -> bool;

    /// Project the patch over the persisted entity: set fields win,
    /// everything else falls back to the persisted value.
    fn apply_to(&self, persisted: &Self::Entity) -> Self::Entity;
}

/// A server-owned, REST-managed content collection.
pub trait CollectionEntity:
    Clone + std::fmt::Debug + PartialEq + serde::de::DeserializeOwned + Send + Sync + 'static
{
    type Draft: EntityDraft;
    type Patch: EntityPatch<Entity = Self>;

    /// REST resource segment, e.g. `hero-slides`.
    const RESOURCE: &'static str;

    /// Human label used in logs and error messages.
    const LABEL: &'static str;

    /// Multipart field name the backend expects for the image upload.
    const IMAGE_FIELD: &'static str = "image";

    fn id(&self) -> EntityId;

    /// Remote image URL, for collections that carry one.
    fn image_url(&self) -> Option<&str> {
        None
    }
}

/// Rank-ordered collections that support adjacent reordering.
///
/// Reordering swaps the rank field of two neighbours; ranks stay strings
/// because that is how the backend stores them.
pub trait RankOrdered: CollectionEntity {
    fn rank(&self) -> &str;

    /// A patch that rewrites only the rank field.
    fn rank_patch(rank: String) -> Self::Patch;
}
