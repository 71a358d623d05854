mod tokio_registry;

pub use tokio_registry::TokioAlarmRegistry;
