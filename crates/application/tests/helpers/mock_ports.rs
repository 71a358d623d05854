#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sitefence_application::ports::{
    Alarm, AlarmRegistry, BackgroundGateway, BlockListChanged, BlockListSnapshot, BlockListStore,
    Notifier, RuleTable,
};
use sitefence_domain::{BlockEntry, DomainError, RedirectRule};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

pub struct MockRuleTable {
    installed: Arc<RwLock<HashMap<u32, RedirectRule>>>,
    list_calls: AtomicU64,
    update_calls: AtomicU64,
    last_update: Arc<RwLock<Option<(Vec<RedirectRule>, Vec<u32>)>>>,
    should_fail: Arc<RwLock<bool>>,
}

impl MockRuleTable {
    pub fn new() -> Self {
        Self {
            installed: Arc::new(RwLock::new(HashMap::new())),
            list_calls: AtomicU64::new(0),
            update_calls: AtomicU64::new(0),
            last_update: Arc::new(RwLock::new(None)),
            should_fail: Arc::new(RwLock::new(false)),
        }
    }

    pub fn list_calls(&self) -> u64 {
        self.list_calls.load(Ordering::Relaxed)
    }

    pub fn update_calls(&self) -> u64 {
        self.update_calls.load(Ordering::Relaxed)
    }

    pub async fn last_update(&self) -> Option<(Vec<RedirectRule>, Vec<u32>)> {
        self.last_update.read().await.clone()
    }

    pub async fn installed_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.installed.read().await.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub async fn installed_count(&self) -> usize {
        self.installed.read().await.len()
    }

    pub async fn set_should_fail(&self, fail: bool) {
        *self.should_fail.write().await = fail;
    }
}

#[async_trait]
impl RuleTable for MockRuleTable {
    async fn list(&self) -> Result<Vec<RedirectRule>, DomainError> {
        self.list_calls.fetch_add(1, Ordering::Relaxed);
        if *self.should_fail.read().await {
            return Err(DomainError::RuleTableError("list failed".to_string()));
        }
        Ok(self.installed.read().await.values().cloned().collect())
    }

    async fn update(&self, add: Vec<RedirectRule>, remove: Vec<u32>) -> Result<(), DomainError> {
        self.update_calls.fetch_add(1, Ordering::Relaxed);
        if *self.should_fail.read().await {
            return Err(DomainError::RuleTableError("update failed".to_string()));
        }
        let mut installed = self.installed.write().await;
        for id in &remove {
            installed.remove(id);
        }
        for rule in &add {
            installed.insert(rule.id, rule.clone());
        }
        *self.last_update.write().await = Some((add, remove));
        Ok(())
    }
}

pub struct MockAlarmRegistry {
    pending: Arc<RwLock<HashMap<String, DateTime<Utc>>>>,
    clear_calls: AtomicU64,
    create_calls: AtomicU64,
    fail_names: Arc<RwLock<Vec<String>>>,
}

impl MockAlarmRegistry {
    pub fn new() -> Self {
        Self {
            pending: Arc::new(RwLock::new(HashMap::new())),
            clear_calls: AtomicU64::new(0),
            create_calls: AtomicU64::new(0),
            fail_names: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn clear_calls(&self) -> u64 {
        self.clear_calls.load(Ordering::Relaxed)
    }

    pub fn create_calls(&self) -> u64 {
        self.create_calls.load(Ordering::Relaxed)
    }

    pub async fn pending_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.pending.read().await.keys().cloned().collect();
        names.sort();
        names
    }

    pub async fn pending_count(&self) -> usize {
        self.pending.read().await.len()
    }

    /// Make `create` fail for this alarm name only.
    pub async fn fail_for(&self, name: &str) {
        self.fail_names.write().await.push(name.to_string());
    }
}

#[async_trait]
impl AlarmRegistry for MockAlarmRegistry {
    async fn clear_all(&self) -> Result<(), DomainError> {
        self.clear_calls.fetch_add(1, Ordering::Relaxed);
        self.pending.write().await.clear();
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Alarm>, DomainError> {
        Ok(self
            .pending
            .read()
            .await
            .iter()
            .map(|(name, fire_at)| Alarm {
                name: name.clone(),
                fire_at: *fire_at,
            })
            .collect())
    }

    async fn create(&self, name: &str, fire_at: DateTime<Utc>) -> Result<(), DomainError> {
        self.create_calls.fetch_add(1, Ordering::Relaxed);
        if self.fail_names.read().await.iter().any(|n| n == name) {
            return Err(DomainError::AlarmError(format!("create {name} failed")));
        }
        self.pending.write().await.insert(name.to_string(), fire_at);
        Ok(())
    }
}

pub struct MockBlockListStore {
    snapshot: Arc<RwLock<BlockListSnapshot>>,
    save_calls: AtomicU64,
    changes: broadcast::Sender<BlockListChanged>,
}

impl MockBlockListStore {
    pub fn new() -> Self {
        Self::with_snapshot(BlockListSnapshot::default())
    }

    pub fn with_snapshot(snapshot: BlockListSnapshot) -> Self {
        let (changes, _) = broadcast::channel(16);
        Self {
            snapshot: Arc::new(RwLock::new(snapshot)),
            save_calls: AtomicU64::new(0),
            changes,
        }
    }

    pub fn save_calls(&self) -> u64 {
        self.save_calls.load(Ordering::Relaxed)
    }

    pub async fn snapshot(&self) -> BlockListSnapshot {
        self.snapshot.read().await.clone()
    }
}

#[async_trait]
impl BlockListStore for MockBlockListStore {
    async fn load(&self) -> Result<BlockListSnapshot, DomainError> {
        Ok(self.snapshot.read().await.clone())
    }

    async fn save(&self, snapshot: &BlockListSnapshot) -> Result<(), DomainError> {
        self.save_calls.fetch_add(1, Ordering::Relaxed);
        *self.snapshot.write().await = snapshot.clone();
        let _ = self.changes.send(BlockListChanged);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<BlockListChanged> {
        self.changes.subscribe()
    }
}

#[derive(Default)]
pub struct MockNotifier {
    pub sent: Arc<RwLock<Vec<(String, String, String)>>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<(String, String, String)> {
        self.sent.read().await.clone()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn notify(&self, id: &str, title: &str, message: &str) {
        self.sent
            .write()
            .await
            .push((id.to_string(), title.to_string(), message.to_string()));
    }
}

/// Gateway that records applied lists without doing anything.
#[derive(Default)]
pub struct RecordingGateway {
    pub applied: Arc<RwLock<Vec<Vec<BlockEntry>>>>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn applied(&self) -> Vec<Vec<BlockEntry>> {
        self.applied.read().await.clone()
    }
}

#[async_trait]
impl BackgroundGateway for RecordingGateway {
    async fn apply(&self, entries: Vec<BlockEntry>) -> Result<(), DomainError> {
        self.applied.write().await.push(entries);
        Ok(())
    }
}
