use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use sitefence_application::ports::{BlockListChanged, BlockListSnapshot, BlockListStore};
use sitefence_domain::DomainError;
use tokio::sync::{broadcast, Mutex};
use tracing::debug;

/// File-backed block-list store. The file is the source of truth: every
/// `load` re-reads it, so writes from other processes are picked up on
/// the next access. Saves go through a temp file and rename so a crash
/// never leaves a half-written store behind.
pub struct JsonBlockListStore {
    path: PathBuf,
    write_lock: Mutex<()>,
    changes: broadcast::Sender<BlockListChanged>,
}

impl JsonBlockListStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let (changes, _) = broadcast::channel(16);
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
            changes,
        }
    }
}

#[async_trait]
impl BlockListStore for JsonBlockListStore {
    async fn load(&self) -> Result<BlockListSnapshot, DomainError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                DomainError::StorageError(format!(
                    "Corrupt store {}: {e}",
                    self.path.display()
                ))
            }),
            // A missing store is an empty list with a fresh counter.
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BlockListSnapshot::default()),
            Err(e) => Err(DomainError::StorageError(format!(
                "Failed to read {}: {e}",
                self.path.display()
            ))),
        }
    }

    async fn save(&self, snapshot: &BlockListSnapshot) -> Result<(), DomainError> {
        let _guard = self.write_lock.lock().await;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await.map_err(|e| {
                DomainError::StorageError(format!("Failed to create {}: {e}", dir.display()))
            })?;
        }

        let bytes = serde_json::to_vec_pretty(snapshot)
            .map_err(|e| DomainError::StorageError(format!("Failed to encode store: {e}")))?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes).await.map_err(|e| {
            DomainError::StorageError(format!("Failed to write {}: {e}", tmp.display()))
        })?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| {
            DomainError::StorageError(format!("Failed to replace {}: {e}", self.path.display()))
        })?;

        debug!(
            entries = snapshot.blocked_sites.len(),
            next_rule_id = snapshot.next_rule_id,
            "Block list persisted"
        );
        let _ = self.changes.send(BlockListChanged);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<BlockListChanged> {
        self.changes.subscribe()
    }
}
