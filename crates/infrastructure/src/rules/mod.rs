mod file_rule_table;

pub use file_rule_table::FileRuleTable;
