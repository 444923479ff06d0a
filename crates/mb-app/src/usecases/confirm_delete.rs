use std::sync::{Arc, Weak};

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use mb_core::manager::{CollectionManager, MutationKey};
use mb_core::ports::CollectionApiPort;
use mb_core::{CollectionEntity, ManagerError};

use super::refresh_collection::RefreshCollection;

/// Use case for the second step of the delete flow.
///
/// Consumes the candidate stored by `request_delete`; the prompt closes
/// whatever the outcome. On failure the candidate stays discarded, so
/// retrying means asking for confirmation again.
pub struct ConfirmDelete<E: CollectionEntity> {
    api: Arc<dyn CollectionApiPort<E>>,
    state: Weak<Mutex<CollectionManager<E>>>,
    refresh: RefreshCollection<E>,
}

impl<E: CollectionEntity> ConfirmDelete<E> {
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
        name = "usecase.confirm_delete.execute",
        skip(self),
        fields(resource = E::RESOURCE)
    )]
    pub async fn execute(&self) -> Result<(), ManagerError> {
        let (id, page) = {
            let Some(state) = self.state.upgrade() else {
                return Ok(());
            };
            let mut manager = state.lock().await;
            let id = manager
                .take_delete_candidate()
                .ok_or(ManagerError::NoDeleteCandidate)?;
            if !manager.try_begin_mutation(MutationKey::Persisted(id)) {
                return Err(ManagerError::MutationInFlight);
            }
            (id, manager.current_page())
        };
        let key = MutationKey::Persisted(id);

        let result = self.api.delete(id).await;

        let Some(state) = self.state.upgrade() else {
            debug!(resource = E::RESOURCE, "state gone mid-flight; dropping delete result");
            return Ok(());
        };
        {
            let mut manager = state.lock().await;
            manager.finish_mutation(&key);
            if result.is_ok() {
                // drop any overlay that pointed at the removed record
                manager.cancel_edit(id);
            }
        }

        match result {
            Ok(()) => {
                info!(resource = E::RESOURCE, id = %id, "record deleted");
                if let Err(err) = self.refresh.execute(page).await {
                    warn!(resource = E::RESOURCE, error = %err, "re-fetch after delete failed");
                }
                Ok(())
            }
            Err(err) => {
                warn!(resource = E::RESOURCE, id = %id, error = %err, "delete failed");
                Err(err.into())
            }
        }
    }
}
