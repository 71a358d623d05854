use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sitefence_domain::{BlockEntry, DomainError};
use tokio::sync::broadcast;

/// The persisted aggregate: the block list plus the monotonic rule-id
/// counter. The counter never decreases and ids are never reused, even
/// across entry deletion; only the creation path advances it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockListSnapshot {
    #[serde(default)]
    pub blocked_sites: Vec<BlockEntry>,
    #[serde(default = "default_next_rule_id")]
    pub next_rule_id: u32,
}

impl Default for BlockListSnapshot {
    fn default() -> Self {
        Self {
            blocked_sites: Vec::new(),
            next_rule_id: default_next_rule_id(),
        }
    }
}

fn default_next_rule_id() -> u32 {
    1
}

impl BlockListSnapshot {
    pub fn find(&self, entry_id: &str) -> Option<&BlockEntry> {
        self.blocked_sites.iter().find(|e| e.id == entry_id)
    }

    pub fn max_rule_id(&self) -> u32 {
        self.blocked_sites
            .iter()
            .map(|e| e.rule_id)
            .max()
            .unwrap_or(0)
    }
}

/// Change notification broadcast to every subscriber after a save.
#[derive(Debug, Clone)]
pub struct BlockListChanged;

#[async_trait]
pub trait BlockListStore: Send + Sync {
    async fn load(&self) -> Result<BlockListSnapshot, DomainError>;

    async fn save(&self, snapshot: &BlockListSnapshot) -> Result<(), DomainError>;

    fn subscribe(&self) -> broadcast::Receiver<BlockListChanged>;
}
