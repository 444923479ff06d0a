use std::sync::{Arc, Weak};

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use mb_core::content::HeroSlide;
use mb_core::manager::{CollectionManager, MutationKey};
use mb_core::ports::HeroSlideApiPort;
use mb_core::{EntityId, ManagerError, PublishStatus};

use super::refresh_collection::RefreshCollection;

/// Use case for toggling a hero slide between active and inactive.
///
/// Goes through the dedicated status endpoint, not the general update. The
/// returned slide replaces the local row immediately; the standard
/// re-fetch still follows.
pub struct SetSlideActive {
    api: Arc<dyn HeroSlideApiPort>,
    state: Weak<Mutex<CollectionManager<HeroSlide>>>,
    refresh: RefreshCollection<HeroSlide>,
}

impl SetSlideActive {
    pub fn from_parts(
        api: Arc<dyn HeroSlideApiPort>,
        state: Weak<Mutex<CollectionManager<HeroSlide>>>,
        refresh: RefreshCollection<HeroSlide>,
    ) -> Self {
        Self {
            api,
            state,
            refresh,
        }
    }

    #[tracing::instrument(
        name = "usecase.set_slide_active.execute",
        skip(self),
        fields(id = %id, status = status.as_str())
    )]
    pub async fn execute(&self, id: EntityId, status: PublishStatus) -> Result<(), ManagerError> {
        let key = MutationKey::Persisted(id);
        let page = {
            let Some(state) = self.state.upgrade() else {
                return Ok(());
            };
            let mut manager = state.lock().await;
            if manager.find(id).is_none() {
                return Err(ManagerError::UnknownEntity(id));
            }
            if !manager.try_begin_mutation(key.clone()) {
                return Err(ManagerError::MutationInFlight);
            }
            manager.current_page()
        };

        let result = self.api.set_active(id, status).await;

        let Some(state) = self.state.upgrade() else {
            debug!("state gone mid-flight; dropping status result");
            return Ok(());
        };
        {
            let mut manager = state.lock().await;
            manager.finish_mutation(&key);
            if let Ok(updated) = &result {
                manager.replace_entity(updated.clone());
            }
        }

        match result {
            Ok(_) => {
                info!(id = %id, status = status.as_str(), "slide status changed");
                if let Err(err) = self.refresh.execute(page).await {
                    warn!(error = %err, "re-fetch after status change failed");
                }
                Ok(())
            }
            Err(err) => {
                warn!(id = %id, error = %err, "status change failed");
                Err(err.into())
            }
        }
    }
}
