//! Environment for the Dusted application.

use std::{
    env,
    path::{Path, PathBuf},
    sync::Mutex,
};

use once_cell::sync::OnceCell;

/// Paths and version information for the running application.
#[derive(Debug, Clone)]
pub struct DustedEnv {
    root_dir: PathBuf,
    dusted_version: String,
}

impl DustedEnv {
    /// An environment rooted at `root_dir`.
    pub fn with_root(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            dusted_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    fn create() -> Self {
        // Config and log files live next to the executable in release builds.
        let root_dir = if cfg!(debug_assertions) {
            env::current_dir().ok()
        } else {
            env::current_exe()
                .ok()
                .and_then(|path| path.parent().map(Path::to_path_buf))
        };
        Self::with_root(root_dir.unwrap_or_else(|| PathBuf::from(".")))
    }

    /// The directory containing config and log files.
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Return the path to the log file.
    pub fn log_file_path(&self) -> PathBuf {
        self.root_dir.join("log.txt")
    }

    /// Return the path to the config file.
    pub fn config_file_path(&self) -> PathBuf {
        self.root_dir.join("config.json")
    }

    /// Return the current version of Dusted.
    pub fn dusted_version(&self) -> &str {
        &self.dusted_version
    }
}

/// Initialize the application environment if needed, and return it.
pub fn global_env() -> &'static Mutex<DustedEnv> {
    static ENV: OnceCell<Mutex<DustedEnv>> = OnceCell::new();

    ENV.get_or_init(|| Mutex::new(DustedEnv::create()))
}
