//! `colloquy.toml` loading.

use colloquy_world::{OnboardingConfig, TaskConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Top-level configuration file.
#[derive(Debug, Deserialize)]
pub struct ColloquyConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub task: TaskConfig,
    #[serde(default)]
    pub onboarding: OnboardingConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

impl Default for ColloquyConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            task: TaskConfig::default(),
            onboarding: OnboardingConfig::default(),
        }
    }
}

impl ColloquyConfig {
    /// Parse `path`, falling back to defaults when the file does not exist.
    pub async fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;
        Ok(toml::from_str(&raw)?)
    }
}
