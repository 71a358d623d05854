use async_trait::async_trait;
use sitefence_domain::{BlockEntry, DomainError};

/// Request/response call from the editing commands to the background
/// host, asking it to bring rules and alarms in line with the given
/// entries. The save flow awaits the acknowledgment before reporting
/// success; it does not wait on any rule-table update directly.
#[async_trait]
pub trait BackgroundGateway: Send + Sync {
    async fn apply(&self, entries: Vec<BlockEntry>) -> Result<(), DomainError>;
}
