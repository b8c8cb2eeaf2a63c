use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::db::connection;
use crate::error::AgencyError;
use crate::models::TaskPriority;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub signed_in_user: Option<String>,
    pub default_priority: TaskPriority,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            signed_in_user: None,
            default_priority: TaskPriority::Medium,
        }
    }
}

/// Read `config.json` from the data directory. A missing file yields defaults.
pub fn load(home: Option<&Path>) -> Result<Config, AgencyError> {
    let path = connection::config_path(home)?;
    if !path.exists() {
        return Ok(Config::default());
    }
    let raw = fs::read_to_string(&path)?;
    serde_json::from_str(&raw)
        .map_err(|e| AgencyError::config(format!("Invalid config at {}: {e}", path.display())))
}

pub fn save(home: Option<&Path>, config: &Config) -> Result<(), AgencyError> {
    let path = connection::config_path(home)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let raw = serde_json::to_string_pretty(config)
        .map_err(|e| AgencyError::config(e.to_string()))?;
    fs::write(&path, raw)?;
    Ok(())
}
