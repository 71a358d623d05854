use std::sync::Arc;

use chrono::Utc;
use sitefence_domain::{hostname, BlockEntry, BlockPolicy, DomainError};
use tracing::{info, instrument};

use crate::ports::{BackgroundGateway, BlockListStore};

/// Edit an existing entry: hostname and policy may change, the entry id
/// and rule id are preserved, the expiry is recomputed.
pub struct UpdateSiteUseCase {
    store: Arc<dyn BlockListStore>,
    gateway: Arc<dyn BackgroundGateway>,
}

impl UpdateSiteUseCase {
    pub fn new(store: Arc<dyn BlockListStore>, gateway: Arc<dyn BackgroundGateway>) -> Self {
        Self { store, gateway }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self,
        entry_id: &str,
        raw_url: &str,
        policy: BlockPolicy,
    ) -> Result<BlockEntry, DomainError> {
        let hostname = hostname::normalize(raw_url)?;
        let expires_at = policy.resolve_expiry(Utc::now())?;

        let mut snapshot = self.store.load().await?;
        if snapshot
            .blocked_sites
            .iter()
            .any(|e| e.hostname == hostname && e.id != entry_id)
        {
            return Err(DomainError::DuplicateHostname(hostname));
        }

        let entry = snapshot
            .blocked_sites
            .iter_mut()
            .find(|e| e.id == entry_id)
            .ok_or_else(|| DomainError::EntryNotFound(entry_id.to_string()))?;

        entry.hostname = hostname;
        entry.policy = policy;
        entry.expires_at = expires_at;
        let updated = entry.clone();

        self.store.save(&snapshot).await?;
        self.gateway.apply(snapshot.blocked_sites).await?;

        info!(
            hostname = %updated.hostname,
            policy = updated.policy.kind(),
            "Block entry updated"
        );
        Ok(updated)
    }
}
