use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sitefence_application::ports::{Alarm, AlarmFired, AlarmRegistry};
use sitefence_domain::DomainError;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::warn;

struct PendingAlarm {
    fire_at: DateTime<Utc>,
    handle: JoinHandle<()>,
}

/// In-process one-shot timers. Each alarm is a task sleeping until its
/// fire instant, then emitting an [`AlarmFired`] event on the runner's
/// channel. Alarms live only as long as the process; the background
/// host rebuilds the full set from the store at startup.
pub struct TokioAlarmRegistry {
    events: mpsc::Sender<AlarmFired>,
    pending: Arc<Mutex<HashMap<String, PendingAlarm>>>,
}

impl TokioAlarmRegistry {
    pub fn new(events: mpsc::Sender<AlarmFired>) -> Self {
        Self {
            events,
            pending: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl AlarmRegistry for TokioAlarmRegistry {
    async fn clear_all(&self) -> Result<(), DomainError> {
        let mut pending = self.pending.lock().await;
        for (_, alarm) in pending.drain() {
            alarm.handle.abort();
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Alarm>, DomainError> {
        let pending = self.pending.lock().await;
        let mut alarms: Vec<Alarm> = pending
            .iter()
            .map(|(name, p)| Alarm {
                name: name.clone(),
                fire_at: p.fire_at,
            })
            .collect();
        alarms.sort_by_key(|a| a.fire_at);
        Ok(alarms)
    }

    async fn create(&self, name: &str, fire_at: DateTime<Utc>) -> Result<(), DomainError> {
        let delay = (fire_at - Utc::now())
            .to_std()
            .unwrap_or(Duration::ZERO);

        // The map entry must be installed before the task can look
        // itself up, so the lock is held across the spawn.
        let mut map = self.pending.lock().await;

        let events = self.events.clone();
        let pending = Arc::clone(&self.pending);
        let task_name = name.to_string();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            // Deregister ourselves unless a newer alarm took the name.
            {
                let mut map = pending.lock().await;
                match map.get(&task_name) {
                    Some(p) if p.fire_at == fire_at => {
                        map.remove(&task_name);
                    }
                    _ => return,
                }
            }

            if events.send(AlarmFired { name: task_name }).await.is_err() {
                warn!("Alarm fired but no listener is attached");
            }
        });

        if let Some(previous) = map.insert(
            name.to_string(),
            PendingAlarm { fire_at, handle },
        ) {
            previous.handle.abort();
        }
        Ok(())
    }
}
