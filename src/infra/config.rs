use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Resolved runtime configuration for the inference endpoint and persistence.
///
/// Built once at process start and passed into the components that need it.
/// Every field has a default so the tool works with no config file present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the OpenAI-compatible server (e.g. LM Studio)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifier sent with every completion request
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout for the fix call, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Generation cap; `None` means uncapped (sent as -1 on the wire)
    #[serde(default)]
    pub max_tokens: Option<u32>,

    /// Directory receiving timestamped backups before an overwrite
    #[serde(default = "default_backup_dir")]
    pub backup_dir: String,
}

fn default_base_url() -> String {
    "http://localhost:1234/v1".to_string()
}

fn default_model() -> String {
    "local-model".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_backup_dir() -> String {
    "_backup".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            max_tokens: None,
            backup_dir: default_backup_dir(),
        }
    }
}

pub fn load_config() -> Result<Config> {
    let mut builder = config::Config::builder();

    // Load from config files in priority order
    let config_paths = ["codefix.toml", ".codefix.toml"];

    for path in &config_paths {
        if Path::new(path).exists() {
            builder = builder.add_source(config::File::with_name(path));
            break;
        }
    }

    // Add environment variables with CODEFIX_ prefix
    builder = builder.add_source(config::Environment::with_prefix("CODEFIX"));

    let cfg = builder.build().context("Failed to load configuration")?;
    let parsed: Config = cfg
        .try_deserialize()
        .context("Failed to parse configuration")?;

    Ok(parsed)
}
