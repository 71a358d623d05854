use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sitefence_domain::DomainError;

pub const UNBLOCK_ALARM_PREFIX: &str = "unblock_";

/// Name of the one-shot alarm that lifts the block for `entry_id`.
pub fn unblock_alarm_name(entry_id: &str) -> String {
    format!("{UNBLOCK_ALARM_PREFIX}{entry_id}")
}

/// Inverse of [`unblock_alarm_name`]; `None` for alarms owned by someone
/// else.
pub fn entry_id_from_alarm_name(name: &str) -> Option<&str> {
    name.strip_prefix(UNBLOCK_ALARM_PREFIX)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alarm {
    pub name: String,
    pub fire_at: DateTime<Utc>,
}

/// Event delivered to the background runner when a pending alarm fires.
#[derive(Debug, Clone)]
pub struct AlarmFired {
    pub name: String,
}

/// One-shot named timers. Creating an alarm under an existing name
/// replaces the pending one.
#[async_trait]
pub trait AlarmRegistry: Send + Sync {
    async fn clear_all(&self) -> Result<(), DomainError>;

    async fn list(&self) -> Result<Vec<Alarm>, DomainError>;

    async fn create(&self, name: &str, fire_at: DateTime<Utc>) -> Result<(), DomainError>;
}
