use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Invalid hostname: {0}")]
    InvalidHostname(String),

    #[error("Invalid block duration: {0} minutes")]
    InvalidDuration(u32),

    #[error("Invalid unblock time: {hour:02}:{minute:02}")]
    InvalidClockTime { hour: u32, minute: u32 },

    #[error("Invalid time format (expected HH:MM): {0}")]
    InvalidTimeFormat(String),

    #[error("{0} is already in the block list")]
    DuplicateHostname(String),

    #[error("Block entry not found: {0}")]
    EntryNotFound(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Rule table error: {0}")]
    RuleTableError(String),

    #[error("Alarm registry error: {0}")]
    AlarmError(String),

    #[error("Background host unavailable: {0}")]
    BackgroundUnavailable(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
