use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing
/// shape; older configs deserialize with field defaults.
const CURRENT_VERSION: u32 = 1;

/// Engine configuration. All fields have defaults so an empty config
/// deserializes to something usable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default = "default_version")]
    pub config_version: u32,
    /// Language used when a session does not specify one.
    #[serde(default = "default_language")]
    pub default_language: String,
    /// Upper bound on the recommendation list of a result.
    #[serde(default = "default_max_recommendations")]
    pub max_recommendations: usize,
    /// Override for the storage data directory. `None` means the
    /// platform data directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            default_language: default_language(),
            max_recommendations: default_max_recommendations(),
            data_dir: None,
        }
    }
}

fn default_version() -> u32 {
    CURRENT_VERSION
}

fn default_language() -> String {
    "en".to_string()
}

fn default_max_recommendations() -> usize {
    8
}
