use std::sync::Arc;

use chrono::Utc;
use sitefence_domain::{hostname, BlockEntry, BlockPolicy, DomainError};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::ports::{BackgroundGateway, BlockListStore};

/// Add a host to the block list. Allocates the entry id and the next
/// rule id; this is the only path that advances the persisted counter.
pub struct BlockSiteUseCase {
    store: Arc<dyn BlockListStore>,
    gateway: Arc<dyn BackgroundGateway>,
}

impl BlockSiteUseCase {
    pub fn new(store: Arc<dyn BlockListStore>, gateway: Arc<dyn BackgroundGateway>) -> Self {
        Self { store, gateway }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, raw_url: &str, policy: BlockPolicy) -> Result<BlockEntry, DomainError> {
        // Validation first; nothing is persisted if it fails.
        let hostname = hostname::normalize(raw_url)?;
        let expires_at = policy.resolve_expiry(Utc::now())?;

        let mut snapshot = self.store.load().await?;
        if snapshot.blocked_sites.iter().any(|e| e.hostname == hostname) {
            return Err(DomainError::DuplicateHostname(hostname));
        }

        let entry = BlockEntry::new(
            Uuid::new_v4().to_string(),
            hostname,
            policy,
            expires_at,
            snapshot.next_rule_id,
        );
        snapshot.next_rule_id += 1;
        snapshot.blocked_sites.push(entry.clone());

        self.store.save(&snapshot).await?;
        self.gateway.apply(snapshot.blocked_sites).await?;

        info!(
            hostname = %entry.hostname,
            policy = entry.policy.kind(),
            rule_id = entry.rule_id,
            "Site added to block list"
        );
        Ok(entry)
    }
}
