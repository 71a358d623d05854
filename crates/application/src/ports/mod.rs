mod alarm_registry;
mod background_gateway;
mod block_list_store;
mod notifier;
mod rule_table;

pub use alarm_registry::{
    entry_id_from_alarm_name, unblock_alarm_name, Alarm, AlarmFired, AlarmRegistry,
    UNBLOCK_ALARM_PREFIX,
};
pub use background_gateway::BackgroundGateway;
pub use block_list_store::{BlockListChanged, BlockListSnapshot, BlockListStore};
pub use notifier::Notifier;
pub use rule_table::RuleTable;
