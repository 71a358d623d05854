use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use sitefence_domain::{desired_rules, BlockEntry, DomainError, RedirectRule};
use tracing::{debug, error, info, instrument};

use crate::ports::RuleTable;

/// Rule synchronizer: reconciles the installed redirect-rule table
/// against the current block list with a minimal diff. Idempotent; a
/// repeated call with an unchanged list performs no table update.
pub struct ReconcileRulesUseCase {
    rule_table: Arc<dyn RuleTable>,
    block_page_url: String,
}

impl ReconcileRulesUseCase {
    pub fn new(rule_table: Arc<dyn RuleTable>, block_page_url: String) -> Self {
        Self {
            rule_table,
            block_page_url,
        }
    }

    /// Table errors are logged and swallowed; the next reconcile (next
    /// user action or scheduled wake) is the retry mechanism.
    #[instrument(skip(self, entries))]
    pub async fn execute(&self, entries: &[BlockEntry]) {
        if let Err(e) = self.try_reconcile(entries).await {
            error!(error = %e, "Redirect rule reconcile failed; retrying on next sync");
        }
    }

    async fn try_reconcile(&self, entries: &[BlockEntry]) -> Result<(), DomainError> {
        let desired = desired_rules(entries, &self.block_page_url);
        let installed = self.rule_table.list().await?;

        let installed_by_id: HashMap<u32, &RedirectRule> =
            installed.iter().map(|r| (r.id, r)).collect();
        let desired_ids: HashSet<u32> = desired.iter().map(|r| r.id).collect();

        // Add what is missing or whose payload changed; value equality of
        // action and condition decides "changed", not the id.
        let to_add: Vec<RedirectRule> = desired
            .into_iter()
            .filter(|rule| {
                installed_by_id
                    .get(&rule.id)
                    .map_or(true, |current| !current.payload_eq(rule))
            })
            .collect();

        // Remove installed ids no longer desired. The table holds only
        // ids this synchronizer allocated, so the whole fetched set is
        // ours to manage.
        let to_remove: Vec<u32> = installed
            .iter()
            .map(|r| r.id)
            .filter(|id| !desired_ids.contains(id))
            .collect();

        if to_add.is_empty() && to_remove.is_empty() {
            debug!("Redirect rules already in sync");
            return Ok(());
        }

        info!(
            added = to_add.len(),
            removed = to_remove.len(),
            "Updating redirect rules"
        );
        self.rule_table.update(to_add, to_remove).await
    }
}
