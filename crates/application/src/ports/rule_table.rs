use async_trait::async_trait;
use sitefence_domain::{DomainError, RedirectRule};

/// The platform's redirect-rule table. `list` is the source of truth for
/// what is currently installed; `update` applies removals and additions
/// as one atomic operation (an added id that already exists replaces the
/// installed rule).
#[async_trait]
pub trait RuleTable: Send + Sync {
    async fn list(&self) -> Result<Vec<RedirectRule>, DomainError>;

    async fn update(&self, add: Vec<RedirectRule>, remove: Vec<u32>) -> Result<(), DomainError>;
}
