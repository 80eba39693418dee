//! Normalizer configuration
//!
//! Loaded from `Config/normalizer.yaml` under the project root. Every key is
//! optional; a missing file means defaults.

use crate::explanation::DEFAULT_MAX_COMMENTS;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Topic used when a record has none
    pub default_topic: String,
    /// Comments quoted when there is no official description
    pub max_comments: usize,
    /// Leading part of generated question ids
    pub id_prefix: String,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            default_topic: "General".to_string(),
            max_comments: DEFAULT_MAX_COMMENTS,
            id_prefix: "q".to_string(),
        }
    }
}

fn config_path(root: &str) -> std::path::PathBuf {
    Path::new(root).join("Config").join("normalizer.yaml")
}

/// Load configuration, falling back to defaults when the file is absent
pub fn load_config(root: &str) -> Result<NormalizerConfig> {
    let path = config_path(root);

    if !path.exists() {
        tracing::debug!("No config at {:?}, using defaults", path);
        return Ok(NormalizerConfig::default());
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config from {:?}", path))?;

    let config: NormalizerConfig = serde_yaml::from_str(&content)
        .with_context(|| "Failed to parse normalizer.yaml")?;

    Ok(config)
}
