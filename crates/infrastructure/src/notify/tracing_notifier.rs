use async_trait::async_trait;
use sitefence_application::ports::Notifier;
use tracing::info;

/// Headless notification surface: notifications are rendered as log
/// lines. Fire-and-forget, never fails.
pub struct TracingNotifier {
    enabled: bool,
}

impl TracingNotifier {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

#[async_trait]
impl Notifier for TracingNotifier {
    async fn notify(&self, id: &str, title: &str, message: &str) {
        if !self.enabled {
            return;
        }
        info!(notification_id = id, title, "{message}");
    }
}
