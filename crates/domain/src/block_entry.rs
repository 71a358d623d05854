use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// How long a host stays blocked.
///
/// Serialized with the `blockType` tag so stored entries read as
/// `{"blockType":"duration","durationMinutes":30,...}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "blockType", rename_all = "camelCase")]
pub enum BlockPolicy {
    Permanent,
    #[serde(rename_all = "camelCase")]
    Duration { duration_minutes: u32 },
    #[serde(rename_all = "camelCase")]
    UntilTime { hour: u32, minute: u32 },
}

impl BlockPolicy {
    pub fn kind(&self) -> &'static str {
        match self {
            BlockPolicy::Permanent => "permanent",
            BlockPolicy::Duration { .. } => "duration",
            BlockPolicy::UntilTime { .. } => "untilTime",
        }
    }

    /// Resolve the policy to an absolute expiry instant relative to `now`.
    ///
    /// `Permanent` has no expiry. `Duration` counts forward from `now`.
    /// `UntilTime` picks the next occurrence of the wall-clock time: today
    /// if still ahead, otherwise tomorrow. Rejects zero durations and
    /// out-of-range clock times before anything is persisted.
    pub fn resolve_expiry(&self, now: DateTime<Utc>) -> Result<Option<DateTime<Utc>>, DomainError> {
        match *self {
            BlockPolicy::Permanent => Ok(None),
            BlockPolicy::Duration { duration_minutes } => {
                if duration_minutes == 0 {
                    return Err(DomainError::InvalidDuration(duration_minutes));
                }
                Ok(Some(now + Duration::minutes(duration_minutes as i64)))
            }
            BlockPolicy::UntilTime { hour, minute } => {
                let today = now
                    .date_naive()
                    .and_hms_opt(hour, minute, 0)
                    .ok_or(DomainError::InvalidClockTime { hour, minute })?;
                let mut fire_at = DateTime::<Utc>::from_naive_utc_and_offset(today, Utc);
                if fire_at <= now {
                    fire_at += Duration::days(1);
                }
                Ok(Some(fire_at))
            }
        }
    }
}

/// One blocked host.
///
/// Field names mirror the persisted store format: `url` holds the
/// normalized hostname, `unblockTime` the expiry as epoch milliseconds.
/// A legacy `isActive` field from older stores is ignored on read;
/// removal from the list is the only representation of "unblocked".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockEntry {
    pub id: String,
    #[serde(rename = "url")]
    pub hostname: String,
    #[serde(flatten)]
    pub policy: BlockPolicy,
    #[serde(
        rename = "unblockTime",
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub expires_at: Option<DateTime<Utc>>,
    pub rule_id: u32,
}

impl BlockEntry {
    pub fn new(
        id: String,
        hostname: String,
        policy: BlockPolicy,
        expires_at: Option<DateTime<Utc>>,
        rule_id: u32,
    ) -> Self {
        Self {
            id,
            hostname,
            policy,
            expires_at,
            rule_id,
        }
    }

    /// True once the entry's expiry instant has passed. Permanent
    /// entries never expire.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|t| t <= now)
    }
}
