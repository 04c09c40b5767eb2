//! Board settings, read from `board.json` in the OS config directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::board::edge::EdgeConfig;
use crate::error::{ConfigError, ConfigResult};

const SETTINGS_FILE: &str = "board.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Pixel density for viewports created by the app.
    pub px_per_day: f32,
    pub edge_threshold_px: f32,
    pub extend_days: u32,
    pub debounce_ms: u64,
    pub row_height_px: f32,
    /// How long an unanswered extension request blocks further ones.
    pub extension_timeout_ms: u64,
    pub label_pane_width: f32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            px_per_day: 16.0,
            edge_threshold_px: 100.0,
            extend_days: 30,
            debounce_ms: 50,
            row_height_px: 40.0,
            extension_timeout_ms: 1000,
            label_pane_width: 256.0,
        }
    }
}

impl BoardConfig {
    /// Default location of the settings file.
    pub fn default_path() -> PathBuf {
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "TimelineBoard") {
            proj_dirs.config_dir().join(SETTINGS_FILE)
        } else {
            PathBuf::from(".").join(SETTINGS_FILE)
        }
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config: Self = serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the default location, falling back to defaults on any error.
    pub fn load_or_default() -> Self {
        let path = Self::default_path();
        Self::load(&path).unwrap_or_else(|e| {
            warn!(error = %e, "ignoring board settings");
            Self::default()
        })
    }

    pub fn validate(&self) -> ConfigResult<()> {
        positive("px_per_day", self.px_per_day)?;
        positive("row_height_px", self.row_height_px)?;
        positive("label_pane_width", self.label_pane_width)?;
        if !(self.edge_threshold_px.is_finite() && self.edge_threshold_px >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "edge_threshold_px",
                reason: format!("must be zero or more, got {}", self.edge_threshold_px),
            });
        }
        if self.extend_days == 0 {
            return Err(ConfigError::Invalid {
                field: "extend_days",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn edge_config(&self) -> EdgeConfig {
        EdgeConfig {
            threshold_px: self.edge_threshold_px,
            extend_days: self.extend_days,
            debounce: Duration::from_millis(self.debounce_ms),
            request_timeout: Duration::from_millis(self.extension_timeout_ms),
        }
    }
}

fn positive(field: &'static str, value: f32) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be positive, got {value}"),
        })
    }
}
