use crate::app_dirs::AppDirs;
use crate::grid::GridSize;
use crate::session::{GameSession, SessionConfig, DEFAULT_ROUND_SECS};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Settings remembered between runs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub grid_size: GridSize,
    pub round_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid_size: GridSize::default(),
            round_secs: DEFAULT_ROUND_SECS,
        }
    }
}

impl From<&GameSession> for Config {
    fn from(session: &GameSession) -> Self {
        Self {
            grid_size: session.grid_size(),
            round_secs: session.round_secs(),
        }
    }
}

impl From<&Config> for SessionConfig {
    fn from(cfg: &Config) -> Self {
        Self {
            grid_size: cfg.grid_size,
            round_secs: cfg.round_secs,
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(_) => return Config::default(),
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("ignoring unreadable config {}: {e}", self.path.display());
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("config.json"));
        let cfg = Config::default();
        store.save(&cfg).unwrap();
        assert_eq!(store.load(), cfg);
    }

    #[test]
    fn save_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/deeper/config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config {
            grid_size: GridSize::Thirty,
            round_secs: 30,
        };
        store.save(&cfg).unwrap();
        assert!(path.exists());
        assert_eq!(store.load(), cfg);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("absent.json"));
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn invalid_grid_size_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "grid_size": 12, "round_secs": 40 }"#).unwrap();
        assert_eq!(FileConfigStore::with_path(&path).load(), Config::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "grid_size": 20 }"#).unwrap();
        let cfg = FileConfigStore::with_path(&path).load();
        assert_eq!(cfg.grid_size, GridSize::Twenty);
        assert_eq!(cfg.round_secs, DEFAULT_ROUND_SECS);
    }

    #[test]
    fn config_from_session_tracks_grid_choice() {
        let mut session = GameSession::with_seed(SessionConfig::default(), 5);
        session.set_grid_size(GridSize::Twenty);
        let cfg = Config::from(&session);
        assert_eq!(cfg.grid_size, GridSize::Twenty);
        assert_eq!(cfg.round_secs, DEFAULT_ROUND_SECS);
        assert_eq!(SessionConfig::from(&cfg).grid_size, GridSize::Twenty);
    }
}
