//! Console configuration.

use std::path::{Path, PathBuf};

use ea_core::virtual_list::{RowHeight, WindowError, DEFAULT_OVERSCAN};
use ea_core::windowed::WindowedRenderer;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_ROW_HEIGHT: f32 = 44.0;
pub const DEFAULT_LOG_FILTER: &str = "info";
const CONFIG_DIR: &str = "estate-admin";
const CONFIG_FILE: &str = "console.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Window(#[from] WindowError),
    #[error("config location could not be resolved")]
    NoConfigDir,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ConsoleConfig {
    pub row_height: f32,
    pub overscan: usize,
    /// JSON array of users. Sample data is generated when unset.
    pub data_path: Option<PathBuf>,
    pub sample_size: usize,
    pub log_filter: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
            overscan: DEFAULT_OVERSCAN,
            data_path: None,
            sample_size: 5_000,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ConsoleConfig {
    /// Loads configuration from a JSON file at the given path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let buf = std::fs::read(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: ConsoleConfig =
            serde_json::from_slice(&buf).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the per-user config, falling back to defaults when the file or
    /// its location does not exist.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) if path.exists() => Self::load_from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Saves the configuration, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save_default_location(&self) -> Result<PathBuf, ConfigError> {
        let path = config_path().ok_or(ConfigError::NoConfigDir)?;
        self.save(&path)?;
        Ok(path)
    }

    pub fn validate(&self) -> Result<RowHeight, ConfigError> {
        Ok(RowHeight::try_new(self.row_height)?)
    }

    pub fn renderer(&self) -> Result<WindowedRenderer, ConfigError> {
        Ok(WindowedRenderer::new(self.validate()?).with_overscan(self.overscan))
    }
}

pub fn config_path() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(dir).join(CONFIG_DIR).join(CONFIG_FILE));
    }
    if let Ok(home) = std::env::var("HOME") {
        return Some(
            PathBuf::from(home)
                .join(".config")
                .join(CONFIG_DIR)
                .join(CONFIG_FILE),
        );
    }
    #[cfg(target_os = "windows")]
    {
        if let Ok(appdata) = std::env::var("APPDATA") {
            return Some(PathBuf::from(appdata).join(CONFIG_DIR).join(CONFIG_FILE));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn t_cfg_001_save_then_load_round_trip() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("console.json");
        let config = ConsoleConfig {
            row_height: 36.0,
            overscan: 4,
            data_path: Some(PathBuf::from("/srv/users.json")),
            sample_size: 10,
            log_filter: "ea_app=debug".to_string(),
        };
        config.save(&path).expect("save");
        let loaded = ConsoleConfig::load_from_file(&path).expect("load");
        assert_eq!(loaded, config);
    }

    #[test]
    fn t_cfg_002_missing_fields_use_defaults() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("console.json");
        std::fs::write(&path, r#"{ "overscan": 2 }"#).expect("write");

        let loaded = ConsoleConfig::load_from_file(&path).expect("load");
        assert_eq!(loaded.overscan, 2);
        assert_eq!(loaded.row_height, DEFAULT_ROW_HEIGHT);
        assert_eq!(loaded.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn t_cfg_003_invalid_row_height_is_rejected() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("console.json");
        std::fs::write(&path, r#"{ "row_height": 0.0 }"#).expect("write");

        let err = ConsoleConfig::load_from_file(&path).expect_err("invalid");
        assert!(matches!(err, ConfigError::Window(WindowError::InvalidRowHeight(_))));
    }

    #[test]
    fn t_cfg_004_invalid_json_is_rejected() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("console.json");
        let mut file = std::fs::File::create(&path).expect("create");
        writeln!(file, "invalid json").expect("write");

        let err = ConsoleConfig::load_from_file(&path).expect_err("invalid");
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn t_cfg_005_renderer_uses_configured_geometry() {
        let config = ConsoleConfig {
            row_height: 30.0,
            overscan: 3,
            ..ConsoleConfig::default()
        };
        let renderer = config.renderer().expect("renderer");
        assert_eq!(renderer.row_height(), 30.0);
        assert_eq!(renderer.overscan(), 3);
    }
}
