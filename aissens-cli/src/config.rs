use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

/// Optional YAML configuration, mirroring the keys the broker-side
/// deployments use:
///
/// ```yaml
/// record_name: vibration_data
/// sink: stdout
/// ```
///
/// Command-line flags take precedence over the file.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub record_name: Option<String>,
    #[serde(default)]
    pub sink: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_yaml_ng::from_str(&raw)
            .with_context(|| format!("invalid config {}", path.display()))
    }
}
