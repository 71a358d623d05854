use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use sitefence_application::ports::{AlarmFired, BlockListSnapshot, BlockListStore};
use sitefence_application::use_cases::{
    HandleExpiryUseCase, ReconcileRulesUseCase, RescheduleAlarmsUseCase,
};
use sitefence_domain::DomainError;
use tokio::sync::{broadcast, mpsc};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::gateway::ApplyRequest;

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// The background host: bootstraps rules and alarms from the persisted
/// list at startup, then reacts to fired alarms, apply requests from the
/// UI layer, and store changes until cancelled. In-process saves arrive
/// over the store's change stream; writes from other processes (one-shot
/// CLI invocations against the same files) are picked up by a periodic
/// store poll.
pub struct BackgroundRunner {
    store: Arc<dyn BlockListStore>,
    reconcile: Arc<ReconcileRulesUseCase>,
    reschedule: Arc<RescheduleAlarmsUseCase>,
    handle_expiry: Arc<HandleExpiryUseCase>,
    apply_rx: mpsc::Receiver<ApplyRequest>,
    alarm_rx: mpsc::Receiver<AlarmFired>,
    shutdown: CancellationToken,
    poll_interval: Duration,
    last_seen: Option<BlockListSnapshot>,
}

impl BackgroundRunner {
    pub fn new(
        store: Arc<dyn BlockListStore>,
        reconcile: Arc<ReconcileRulesUseCase>,
        reschedule: Arc<RescheduleAlarmsUseCase>,
        handle_expiry: Arc<HandleExpiryUseCase>,
        apply_rx: mpsc::Receiver<ApplyRequest>,
        alarm_rx: mpsc::Receiver<AlarmFired>,
    ) -> Self {
        Self {
            store,
            reconcile,
            reschedule,
            handle_expiry,
            apply_rx,
            alarm_rx,
            shutdown: CancellationToken::new(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            last_seen: None,
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Re-derive all runtime state from the persisted list. Heals the
    /// rule-id counter if it fell behind the stored entries and sweeps
    /// entries whose expiry passed while no host was running.
    pub async fn bootstrap(&mut self) -> Result<(), DomainError> {
        let mut snapshot = self.store.load().await?;
        let mut dirty = false;

        let max_rule_id = snapshot.max_rule_id();
        if snapshot.next_rule_id <= max_rule_id {
            info!(
                next_rule_id = snapshot.next_rule_id,
                max_rule_id, "Rule id counter behind stored entries; advancing"
            );
            snapshot.next_rule_id = max_rule_id + 1;
            dirty = true;
        }

        let now = Utc::now();
        let before = snapshot.blocked_sites.len();
        snapshot.blocked_sites.retain(|e| !e.is_expired(now));
        let swept = before - snapshot.blocked_sites.len();
        if swept > 0 {
            info!(swept, "Removed blocks that expired while the host was down");
            dirty = true;
        }

        if dirty {
            self.store.save(&snapshot).await?;
        }

        self.reconcile.execute(&snapshot.blocked_sites).await;
        self.reschedule.execute(&snapshot.blocked_sites).await;
        info!(
            entries = snapshot.blocked_sites.len(),
            "Background host bootstrapped"
        );
        self.last_seen = Some(snapshot);
        Ok(())
    }

    pub async fn run(mut self) {
        if let Err(e) = self.bootstrap().await {
            error!(error = %e, "Bootstrap failed; continuing with event loop");
        }

        let mut changes = self.store.subscribe();
        // The change stream only carries saves from this process; the
        // poll catches writes from one-shot invocations.
        let mut poll = tokio::time::interval(self.poll_interval);
        poll.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!("Background runner shutting down");
                    break;
                }
                Some(request) = self.apply_rx.recv() => {
                    self.reconcile.execute(&request.entries).await;
                    self.reschedule.execute(&request.entries).await;
                    // The UI save flow blocks on this ack.
                    let _ = request.respond_to.send(());
                }
                Some(fired) = self.alarm_rx.recv() => {
                    if let Err(e) = self.handle_expiry.execute(&fired.name).await {
                        error!(alarm = %fired.name, error = %e, "Expiry handling failed");
                    }
                }
                changed = changes.recv() => {
                    match changed {
                        Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => {
                            self.resync_if_changed().await;
                        }
                        Err(broadcast::error::RecvError::Closed) => {
                            warn!("Store change stream closed");
                            break;
                        }
                    }
                }
                _ = poll.tick() => {
                    self.resync_if_changed().await;
                }
            }
        }
    }

    /// Reload the store and rebuild rules and alarms when the snapshot
    /// differs from the last one this runner applied.
    async fn resync_if_changed(&mut self) {
        let snapshot = match self.store.load().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!(error = %e, "Failed to reload block list");
                return;
            }
        };
        if self.last_seen.as_ref() == Some(&snapshot) {
            return;
        }

        info!(
            entries = snapshot.blocked_sites.len(),
            "Block list changed; resyncing rules and alarms"
        );
        self.reconcile.execute(&snapshot.blocked_sites).await;
        self.reschedule.execute(&snapshot.blocked_sites).await;
        self.last_seen = Some(snapshot);
    }
}
