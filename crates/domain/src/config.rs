mod errors;
mod logging;
mod notifications;
mod root;
mod rules;
mod storage;

pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use notifications::NotificationsConfig;
pub use root::{CliOverrides, Config};
pub use rules::RulesConfig;
pub use storage::StorageConfig;
