//! Error types for staticpub
//!
//! Every failure during a build or key generation is converted to
//! `AppError`. None of them are recoverable: the binary reports the
//! message and exits with status 1.

use std::path::PathBuf;

use thiserror::Error;

/// Application-wide error type
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or invalid configuration value
    #[error("{0}")]
    Config(String),

    /// Configuration file does not exist
    #[error("{} not found", .0.display())]
    ConfigNotFound(PathBuf),

    /// Reading the key file or writing an artifact failed
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON encoding error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Key generation or encoding error
    #[error("Key error: {0}")]
    Key(String),
}

impl AppError {
    /// Attach the offending path to an I/O error
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_names_the_file() {
        let error = AppError::ConfigNotFound(PathBuf::from("staticpub.toml"));
        assert_eq!(error.to_string(), "staticpub.toml not found");
    }

    #[test]
    fn io_error_includes_path_and_cause() {
        let error = AppError::io(
            "./public.pem",
            std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
        );
        assert_eq!(error.to_string(), "./public.pem: No such file or directory");
    }
}
