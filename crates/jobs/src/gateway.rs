use std::sync::Arc;

use async_trait::async_trait;
use sitefence_application::ports::BackgroundGateway;
use sitefence_application::use_cases::{ReconcileRulesUseCase, RescheduleAlarmsUseCase};
use sitefence_domain::{BlockEntry, DomainError};
use tokio::sync::{mpsc, oneshot};

/// One apply message to the runner: the full current entry list plus a
/// responder for the acknowledgment the save flow waits on.
pub struct ApplyRequest {
    pub entries: Vec<BlockEntry>,
    pub respond_to: oneshot::Sender<()>,
}

/// Gateway into a running [`BackgroundRunner`]: sends the list over the
/// runner's channel and awaits the ack.
///
/// [`BackgroundRunner`]: crate::BackgroundRunner
pub struct ChannelBackgroundGateway {
    requests: mpsc::Sender<ApplyRequest>,
}

impl ChannelBackgroundGateway {
    pub fn new(requests: mpsc::Sender<ApplyRequest>) -> Self {
        Self { requests }
    }
}

#[async_trait]
impl BackgroundGateway for ChannelBackgroundGateway {
    async fn apply(&self, entries: Vec<BlockEntry>) -> Result<(), DomainError> {
        let (respond_to, ack) = oneshot::channel();
        self.requests
            .send(ApplyRequest {
                entries,
                respond_to,
            })
            .await
            .map_err(|_| {
                DomainError::BackgroundUnavailable("background runner is not running".to_string())
            })?;
        ack.await.map_err(|_| {
            DomainError::BackgroundUnavailable("acknowledgment dropped".to_string())
        })
    }
}

/// Gateway for one-shot invocations with no runner loop: runs the rule
/// synchronizer and the expiry scheduler inline, then acks.
pub struct DirectGateway {
    reconcile: Arc<ReconcileRulesUseCase>,
    reschedule: Arc<RescheduleAlarmsUseCase>,
}

impl DirectGateway {
    pub fn new(
        reconcile: Arc<ReconcileRulesUseCase>,
        reschedule: Arc<RescheduleAlarmsUseCase>,
    ) -> Self {
        Self {
            reconcile,
            reschedule,
        }
    }
}

#[async_trait]
impl BackgroundGateway for DirectGateway {
    async fn apply(&self, entries: Vec<BlockEntry>) -> Result<(), DomainError> {
        self.reconcile.execute(&entries).await;
        self.reschedule.execute(&entries).await;
        Ok(())
    }
}
