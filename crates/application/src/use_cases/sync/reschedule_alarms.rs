use std::sync::Arc;

use chrono::Utc;
use sitefence_domain::BlockEntry;
use tracing::{debug, error, instrument};

use crate::ports::{unblock_alarm_name, AlarmRegistry};

/// Expiry scheduler: clears every pending alarm, then rebuilds the set
/// from the block list. Always clear-then-rebuild, never a diff.
pub struct RescheduleAlarmsUseCase {
    alarms: Arc<dyn AlarmRegistry>,
}

impl RescheduleAlarmsUseCase {
    pub fn new(alarms: Arc<dyn AlarmRegistry>) -> Self {
        Self { alarms }
    }

    #[instrument(skip(self, entries))]
    pub async fn execute(&self, entries: &[BlockEntry]) {
        if let Err(e) = self.alarms.clear_all().await {
            error!(error = %e, "Failed to clear pending alarms");
            return;
        }

        let now = Utc::now();
        for entry in entries {
            let Some(fire_at) = entry.expires_at else {
                continue;
            };
            // Already-expired entries get no alarm; the expiry handler or
            // the next list mutation sweeps them.
            if fire_at <= now {
                continue;
            }

            let name = unblock_alarm_name(&entry.id);
            match self.alarms.create(&name, fire_at).await {
                Ok(()) => {
                    debug!(hostname = %entry.hostname, %fire_at, "Unblock alarm scheduled");
                }
                // One failed registration must not stop the rest.
                Err(e) => {
                    error!(
                        entry_id = %entry.id,
                        hostname = %entry.hostname,
                        error = %e,
                        "Failed to schedule unblock alarm"
                    );
                }
            }
        }
    }
}
