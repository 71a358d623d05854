//! sitefence domain layer
pub mod block_entry;
pub mod config;
pub mod errors;
pub mod hostname;
pub mod redirect_rule;

pub use block_entry::{BlockEntry, BlockPolicy};
pub use config::{CliOverrides, Config, ConfigError};
pub use errors::DomainError;
pub use redirect_rule::{
    desired_rules, RedirectRule, ResourceType, RuleAction, RuleCondition, WWW_RULE_OFFSET,
};
