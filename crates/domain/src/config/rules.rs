use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RulesConfig {
    /// Path of the installed redirect-rule table (JSON).
    #[serde(default = "default_rules_path")]
    pub path: String,

    /// Page blocked navigations are redirected to. The original
    /// hostname, unblock instant and policy kind are appended as query
    /// parameters.
    #[serde(default = "default_block_page_url")]
    pub block_page_url: String,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            path: default_rules_path(),
            block_page_url: default_block_page_url(),
        }
    }
}

fn default_rules_path() -> String {
    "sitefence-rules.json".to_string()
}

fn default_block_page_url() -> String {
    "https://sitefence.dev/blocked.html".to_string()
}
