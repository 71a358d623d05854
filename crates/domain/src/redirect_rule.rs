use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::block_entry::BlockEntry;

/// Identifier offset for the `www.`-prefixed companion rule. Exceeds any
/// plausible allocated rule id so the two id spaces never collide.
pub const WWW_RULE_OFFSET: u32 = 100_000;

/// Request classes a rule condition applies to. Only top-level
/// navigations are redirected; subresource loads pass through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResourceType {
    MainFrame,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleCondition {
    pub url_filter: String,
    pub resource_types: Vec<ResourceType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RuleAction {
    Redirect { url: String },
}

/// One installed (or desired) redirect rule, keyed by integer id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectRule {
    pub id: u32,
    pub priority: u32,
    pub action: RuleAction,
    pub condition: RuleCondition,
}

impl RedirectRule {
    /// Value equality of everything except the id. A rule whose payload
    /// differs from the installed one with the same id must be replaced.
    pub fn payload_eq(&self, other: &RedirectRule) -> bool {
        self.priority == other.priority
            && self.action == other.action
            && self.condition == other.condition
    }
}

/// Derive the complete desired rule set for the given entries: two rules
/// per entry, one for the bare hostname (id = `rule_id`) and one for the
/// `www.`-prefixed hostname (id = `rule_id + WWW_RULE_OFFSET`). The pair
/// works around the lack of wildcard host matching in the rule table; a
/// table with wildcard support would need only one rule per entry.
pub fn desired_rules(entries: &[BlockEntry], block_page_url: &str) -> Vec<RedirectRule> {
    let mut rules = Vec::with_capacity(entries.len() * 2);
    for entry in entries {
        rules.push(host_rule(entry, block_page_url, entry.rule_id, &entry.hostname));
        rules.push(host_rule(
            entry,
            block_page_url,
            entry.rule_id + WWW_RULE_OFFSET,
            &format!("www.{}", entry.hostname),
        ));
    }
    rules
}

fn host_rule(entry: &BlockEntry, block_page_url: &str, id: u32, host: &str) -> RedirectRule {
    RedirectRule {
        id,
        priority: 1,
        action: RuleAction::Redirect {
            url: redirect_target(entry, block_page_url, host),
        },
        condition: RuleCondition {
            url_filter: format!("*://{host}/*"),
            resource_types: vec![ResourceType::MainFrame],
        },
    }
}

/// Block-page URL carrying the original hostname, the unblock instant
/// (epoch milliseconds, empty for permanent blocks) and the policy kind.
fn redirect_target(entry: &BlockEntry, block_page_url: &str, host: &str) -> String {
    let unblock_time = entry
        .expires_at
        .map(|t| t.timestamp_millis().to_string())
        .unwrap_or_default();

    let query: String = form_urlencoded::Serializer::new(String::new())
        .append_pair("url", host)
        .append_pair("unblockTime", &unblock_time)
        .append_pair("blockType", entry.policy.kind())
        .finish();

    format!("{block_page_url}?{query}")
}
