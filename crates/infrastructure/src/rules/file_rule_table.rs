use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use sitefence_application::ports::RuleTable;
use sitefence_domain::{DomainError, RedirectRule};
use tokio::sync::Mutex;

/// File-backed redirect-rule table. `update` applies the removal set and
/// the addition set under one lock and one atomic rename, so readers see
/// either the old table or the new one, never a partial update. Adding
/// an id that is already installed replaces that rule.
pub struct FileRuleTable {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileRuleTable {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    async fn read_rules(&self) -> Result<Vec<RedirectRule>, DomainError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                DomainError::RuleTableError(format!(
                    "Corrupt rule table {}: {e}",
                    self.path.display()
                ))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(DomainError::RuleTableError(format!(
                "Failed to read {}: {e}",
                self.path.display()
            ))),
        }
    }

    async fn write_rules(&self, rules: &[RedirectRule]) -> Result<(), DomainError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await.map_err(|e| {
                DomainError::RuleTableError(format!("Failed to create {}: {e}", dir.display()))
            })?;
        }

        let bytes = serde_json::to_vec_pretty(rules)
            .map_err(|e| DomainError::RuleTableError(format!("Failed to encode rules: {e}")))?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes).await.map_err(|e| {
            DomainError::RuleTableError(format!("Failed to write {}: {e}", tmp.display()))
        })?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| {
            DomainError::RuleTableError(format!("Failed to replace {}: {e}", self.path.display()))
        })
    }
}

#[async_trait]
impl RuleTable for FileRuleTable {
    async fn list(&self) -> Result<Vec<RedirectRule>, DomainError> {
        self.read_rules().await
    }

    async fn update(&self, add: Vec<RedirectRule>, remove: Vec<u32>) -> Result<(), DomainError> {
        let _guard = self.lock.lock().await;

        let mut rules = self.read_rules().await?;
        let removed: HashSet<u32> = remove.into_iter().collect();
        let replaced: HashSet<u32> = add.iter().map(|r| r.id).collect();
        rules.retain(|r| !removed.contains(&r.id) && !replaced.contains(&r.id));
        rules.extend(add);

        self.write_rules(&rules).await
    }
}
