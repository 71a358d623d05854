use std::sync::Arc;

use sitefence_domain::DomainError;
use tracing::{info, instrument};

use crate::ports::{entry_id_from_alarm_name, BlockListStore, Notifier};
use crate::use_cases::{ReconcileRulesUseCase, RescheduleAlarmsUseCase};

/// Sole path by which a timed entry leaves the list: an unblock alarm
/// fires, the entry is removed and persisted, rules and alarms are
/// re-derived from the updated list, and the user is notified.
pub struct HandleExpiryUseCase {
    store: Arc<dyn BlockListStore>,
    reconcile: Arc<ReconcileRulesUseCase>,
    reschedule: Arc<RescheduleAlarmsUseCase>,
    notifier: Arc<dyn Notifier>,
}

impl HandleExpiryUseCase {
    pub fn new(
        store: Arc<dyn BlockListStore>,
        reconcile: Arc<ReconcileRulesUseCase>,
        reschedule: Arc<RescheduleAlarmsUseCase>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            reconcile,
            reschedule,
            notifier,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, alarm_name: &str) -> Result<(), DomainError> {
        let Some(entry_id) = entry_id_from_alarm_name(alarm_name) else {
            return Ok(());
        };

        // Reload rather than trust any cached list: a concurrent edit may
        // have removed or replaced the entry since the alarm was set.
        let mut snapshot = self.store.load().await?;
        let Some(index) = snapshot
            .blocked_sites
            .iter()
            .position(|e| e.id == entry_id)
        else {
            info!(entry_id, "Unblock alarm fired for an entry no longer in the list");
            return Ok(());
        };

        let removed = snapshot.blocked_sites.remove(index);
        self.store.save(&snapshot).await?;

        self.reconcile.execute(&snapshot.blocked_sites).await;
        self.reschedule.execute(&snapshot.blocked_sites).await;

        self.notifier
            .notify(
                &format!("unblocked_{}", removed.id),
                "Site unblocked",
                &format!("{} is now accessible.", removed.hostname),
            )
            .await;

        info!(hostname = %removed.hostname, "Expired block removed");
        Ok(())
    }
}
