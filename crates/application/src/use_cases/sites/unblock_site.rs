use std::sync::Arc;

use sitefence_domain::{BlockEntry, DomainError};
use tracing::{info, instrument};

use crate::ports::{BackgroundGateway, BlockListStore};

/// Explicit user delete. The rule id of the removed entry is retired,
/// never handed out again.
pub struct UnblockSiteUseCase {
    store: Arc<dyn BlockListStore>,
    gateway: Arc<dyn BackgroundGateway>,
}

impl UnblockSiteUseCase {
    pub fn new(store: Arc<dyn BlockListStore>, gateway: Arc<dyn BackgroundGateway>) -> Self {
        Self { store, gateway }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, entry_id: &str) -> Result<BlockEntry, DomainError> {
        let mut snapshot = self.store.load().await?;
        let index = snapshot
            .blocked_sites
            .iter()
            .position(|e| e.id == entry_id)
            .ok_or_else(|| DomainError::EntryNotFound(entry_id.to_string()))?;

        let removed = snapshot.blocked_sites.remove(index);
        self.store.save(&snapshot).await?;
        self.gateway.apply(snapshot.blocked_sites).await?;

        info!(hostname = %removed.hostname, "Site removed from block list");
        Ok(removed)
    }
}
