use crate::error::Result;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Tool configuration, read from `featsync.yaml` at the project root.
/// Every field has a default so the file is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Command line that runs the BDD test runner from the project root.
    /// Split on whitespace; the first token must resolve on PATH.
    #[serde(default = "default_runner")]
    pub runner: String,

    /// Extension of step-definition files: `<id>.steps.<steps_ext>`.
    #[serde(default = "default_steps_ext")]
    pub steps_ext: String,

    /// Delay before reacting to a new feature file, so the write can finish.
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
}

fn default_runner() -> String {
    "npx cucumber-js".to_string()
}

fn default_steps_ext() -> String {
    "js".to_string()
}

fn default_settle_ms() -> u64 {
    100
}

impl Default for Config {
    fn default() -> Self {
        Self {
            runner: default_runner(),
            steps_ext: default_steps_ext(),
            settle_ms: default_settle_ms(),
        }
    }
}

impl Config {
    /// Load `featsync.yaml` if present, otherwise return the defaults.
    pub fn load_or_default(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&data)?;
        Ok(config)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&paths::config_path(root), data.as_bytes())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
