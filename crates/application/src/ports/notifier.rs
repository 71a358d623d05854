use async_trait::async_trait;

/// Fire-and-forget user notification surface. No acknowledgment, no
/// error channel: a dropped notification is not worth failing an unblock
/// over.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, id: &str, title: &str, message: &str);
}
