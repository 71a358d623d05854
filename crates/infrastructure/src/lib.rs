//! sitefence infrastructure adapters
pub mod alarms;
pub mod notify;
pub mod rules;
pub mod storage;

pub use alarms::TokioAlarmRegistry;
pub use notify::TracingNotifier;
pub use rules::FileRuleTable;
pub use storage::JsonBlockListStore;
