use std::{
    fs,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::{Deserialize, Serialize};

use crate::AppError;

const DEFAULT_DUSTFORCE_PATH: &str = r"C:\Program Files (x86)\Steam\steamapps\common\Dustforce";

/// User settings, persisted as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The Dustforce install directory, used to launch replays.
    pub dustforce_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dustforce_path: PathBuf::from(DEFAULT_DUSTFORCE_PATH),
        }
    }
}

impl Config {
    /// Load the config file, falling back to defaults if it doesn't exist.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                tracing::info!("no config file at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(error) => {
                return Err(AppError::ConfigReadError {
                    path: path.to_path_buf(),
                    error: Arc::new(error),
                })
            }
        };

        serde_json::from_str(&text).map_err(|error| AppError::ConfigParseError {
            path: path.to_path_buf(),
            error: Arc::new(error),
        })
    }

    /// Write the config file, creating its directory if needed.
    pub fn write(&self, path: &Path) -> Result<(), AppError> {
        self.write_impl(path).map_err(|error| AppError::ConfigWriteError {
            path: path.to_path_buf(),
            error: Arc::new(error),
        })
    }

    fn write_impl(&self, path: &Path) -> io::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)
    }

    /// Return true if the Dustforce directory exists.
    pub fn has_dustforce_dir(&self) -> bool {
        self.dustforce_path.is_dir()
    }
}
