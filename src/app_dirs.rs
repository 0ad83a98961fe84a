use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "tapgrid";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// Directory for runtime state such as the log file
    pub fn state_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(
                PathBuf::from(home)
                    .join(".local")
                    .join("state")
                    .join(APP_NAME),
            )
        } else {
            ProjectDirs::from("", "", APP_NAME)
                .map(|dirs| dirs.data_local_dir().to_path_buf())
        }
    }

    pub fn log_path() -> Option<PathBuf> {
        Self::state_dir()
            .map(|dir| dir.join(format!("{APP_NAME}.log")))
    }

    pub fn config_path() -> PathBuf {
        match ProjectDirs::from("", "", APP_NAME) {
            Some(dirs) => dirs.config_dir().join("config.json"),
            None => PathBuf::from(format!("{APP_NAME}_config.json")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn log_lives_in_state_dir() {
        if let (Some(dir), Some(log)) = (AppDirs::state_dir(), AppDirs::log_path()) {
            assert_eq!(log.parent(), Some(dir.as_path()));
            assert!(log.ends_with("tapgrid.log"));
        }
    }

    #[test]
    fn config_file_name() {
        let path = AppDirs::config_path();
        match ProjectDirs::from("", "", APP_NAME) {
            Some(dirs) => {
                assert_eq!(path, dirs.config_dir().join("config.json"));
                assert_eq!(path.file_name(), Some(OsStr::new("config.json")));
            }
            None => assert_eq!(path, PathBuf::from("tapgrid_config.json")),
        }
    }
}
