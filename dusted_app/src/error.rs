use std::{error, fmt, io, path::PathBuf, sync::Arc};

#[derive(Debug, Clone)]
pub enum AppError {
    Model(dusted_model::Error),
    ConfigReadError {
        path: PathBuf,
        error: Arc<io::Error>,
    },
    ConfigWriteError {
        path: PathBuf,
        error: Arc<io::Error>,
    },
    ConfigParseError {
        path: PathBuf,
        error: Arc<serde_json::Error>,
    },
    LogFileError {
        path: PathBuf,
        error: Arc<io::Error>,
    },
    LoggingAlreadyInitialized,
    MissingPlayer,
    InvalidCharacter(usize),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Model(error) => write!(f, "{}", error),
            AppError::ConfigReadError { path, error } => {
                write!(f, "failed to read {}:\n  {}", path.display(), error)
            }
            AppError::ConfigWriteError { path, error } => {
                write!(f, "failed to write {}:\n  {}", path.display(), error)
            }
            AppError::ConfigParseError { path, error } => {
                write!(f, "invalid config file {}:\n  {}", path.display(), error)
            }
            AppError::LogFileError { path, error } => {
                write!(f, "failed to open log file {}:\n  {}", path.display(), error)
            }
            AppError::LoggingAlreadyInitialized => write!(f, "logging was already initialized"),
            AppError::MissingPlayer => write!(f, "replay has no players"),
            AppError::InvalidCharacter(index) => write!(f, "invalid character index {}", index),
        }
    }
}

impl error::Error for AppError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            AppError::Model(error) => Some(error),
            AppError::ConfigReadError { error, .. }
            | AppError::ConfigWriteError { error, .. }
            | AppError::LogFileError { error, .. } => Some(error.as_ref()),
            AppError::ConfigParseError { error, .. } => Some(error.as_ref()),
            AppError::LoggingAlreadyInitialized
            | AppError::MissingPlayer
            | AppError::InvalidCharacter(_) => None,
        }
    }
}

impl From<dusted_model::Error> for AppError {
    fn from(v: dusted_model::Error) -> Self {
        Self::Model(v)
    }
}
