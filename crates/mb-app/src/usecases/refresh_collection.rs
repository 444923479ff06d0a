use std::sync::{Arc, Weak};

use tokio::sync::Mutex;
use tracing::debug;

use mb_core::manager::CollectionManager;
use mb_core::ports::CollectionApiPort;
use mb_core::{CollectionEntity, ManagerError};

/// Use case for re-fetching a collection page and making it authoritative.
///
/// Ingesting the page discards every edit overlay; the fetched data wins.
/// Holds the manager weakly so a re-fetch resolving after screen teardown
/// is dropped instead of written into dead state.
pub struct RefreshCollection<E: CollectionEntity> {
    api: Arc<dyn CollectionApiPort<E>>,
    state: Weak<Mutex<CollectionManager<E>>>,
}

impl<E: CollectionEntity> Clone for RefreshCollection<E> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            state: self.state.clone(),
        }
    }
}

impl<E: CollectionEntity> RefreshCollection<E> {
    pub fn from_parts(
        api: Arc<dyn CollectionApiPort<E>>,
        state: Weak<Mutex<CollectionManager<E>>>,
    ) -> Self {
        Self { api, state }
    }

    #[tracing::instrument(
        name = "usecase.refresh_collection.execute",
        skip(self),
        fields(resource = E::RESOURCE)
    )]
    pub async fn execute(&self, page: u32) -> Result<(), ManagerError> {
        let fetched = self.api.list(page).await?;
        let Some(state) = self.state.upgrade() else {
            debug!(resource = E::RESOURCE, "state gone before re-fetch landed");
            return Ok(());
        };
        let mut manager = state.lock().await;
        manager.ingest_page(fetched);
        Ok(())
    }
}
