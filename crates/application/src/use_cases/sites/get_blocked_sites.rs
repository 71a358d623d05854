use std::sync::Arc;

use sitefence_domain::{BlockEntry, DomainError};

use crate::ports::BlockListStore;

pub struct GetBlockedSitesUseCase {
    store: Arc<dyn BlockListStore>,
}

impl GetBlockedSitesUseCase {
    pub fn new(store: Arc<dyn BlockListStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self) -> Result<Vec<BlockEntry>, DomainError> {
        Ok(self.store.load().await?.blocked_sites)
    }
}
