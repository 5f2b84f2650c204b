//! Persisted flowmeter settings.

use crate::error::Result;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Flowmeter settings as entered on the dashboard.
///
/// Values are free-form text. Keys the panel does not know about are kept in
/// `extra` and written back on save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowConfig {
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub density: String,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub magnet_offset: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl FlowConfig {
    pub fn new(density: impl Into<String>, magnet_offset: impl Into<String>) -> Self {
        Self {
            density: density.into(),
            magnet_offset: magnet_offset.into(),
            extra: serde_json::Map::new(),
        }
    }
}

// Hand-edited files may hold numbers or null where the form writes strings.
fn scalar_as_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

/// Reads and writes [`FlowConfig`] as a JSON file.
#[derive(Debug)]
pub struct FlowConfigStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FlowConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the settings, falling back to defaults on any problem.
    pub async fn load(&self) -> FlowConfig {
        match self.try_load().await {
            Ok(Some(config)) => config,
            Ok(None) => {
                debug!("No flowmeter config at {:?}, using defaults", self.path);
                FlowConfig::default()
            }
            Err(e) => {
                warn!("Error loading flowmeter config from {:?}: {}", self.path, e);
                FlowConfig::default()
            }
        }
    }

    async fn try_load(&self) -> Result<Option<FlowConfig>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    /// Overwrite the file with `config`.
    pub async fn save(&self, config: &FlowConfig) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        let _guard = self.write_lock.lock().await;
        tokio::fs::write(&self.path, json).await?;
        debug!("Saved flowmeter config to {:?}", self.path);
        Ok(())
    }
}
