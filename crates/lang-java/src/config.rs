//! Classpath configuration, usually read from a JSON file:
//!
//! ```json
//! { "entries": ["lib/guava.jar", "build/classes"], "include_jdk": true }
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_include_jdk() -> bool {
    true
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ClasspathConfig {
    /// Jar files, JImage files or class directories, searched in order.
    #[serde(default)]
    pub entries: Vec<PathBuf>,
    /// Append the JDK core asset found on this machine after `entries`.
    #[serde(default = "default_include_jdk")]
    pub include_jdk: bool,
}

impl Default for ClasspathConfig {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            include_jdk: default_include_jdk(),
        }
    }
}

impl ClasspathConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_json_str(&content)?;
        // Relative entries are relative to the configuration file
        if let Some(base) = path.parent() {
            for entry in &mut config.entries {
                if entry.is_relative() {
                    *entry = base.join(&*entry);
                }
            }
        }
        Ok(config)
    }

    /// The entries to open, with the JDK appended when requested and found.
    pub fn resolved_entries(&self) -> Vec<PathBuf> {
        let mut entries = self.entries.clone();
        if self.include_jdk {
            match crate::jdk::find_jdk_asset() {
                Some(jdk) => {
                    tracing::debug!("Using JDK asset {}", jdk.display());
                    entries.push(jdk);
                }
                None => tracing::warn!("No JDK found, java.* types will not resolve"),
            }
        }
        entries
    }
}
