#![allow(dead_code)]

mod mock_ports;

pub use mock_ports::{
    MockAlarmRegistry, MockBlockListStore, MockNotifier, MockRuleTable, RecordingGateway,
};

use chrono::{DateTime, Duration, Utc};
use sitefence_application::ports::BlockListSnapshot;
use sitefence_domain::{BlockEntry, BlockPolicy};

pub const BLOCK_PAGE: &str = "https://sitefence.dev/blocked.html";

pub fn permanent_entry(hostname: &str, rule_id: u32) -> BlockEntry {
    BlockEntry::new(
        format!("entry-{rule_id}"),
        hostname.to_string(),
        BlockPolicy::Permanent,
        None,
        rule_id,
    )
}

pub fn timed_entry(hostname: &str, rule_id: u32, expires_at: DateTime<Utc>) -> BlockEntry {
    BlockEntry::new(
        format!("entry-{rule_id}"),
        hostname.to_string(),
        BlockPolicy::Duration {
            duration_minutes: 30,
        },
        Some(expires_at),
        rule_id,
    )
}

pub fn in_minutes(minutes: i64) -> DateTime<Utc> {
    Utc::now() + Duration::minutes(minutes)
}

pub fn snapshot_with(entries: Vec<BlockEntry>) -> BlockListSnapshot {
    let next_rule_id = entries.iter().map(|e| e.rule_id).max().unwrap_or(0) + 1;
    BlockListSnapshot {
        blocked_sites: entries,
        next_rule_id,
    }
}
