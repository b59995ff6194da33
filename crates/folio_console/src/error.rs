use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("command '{name}' is already registered")]
    DuplicateCommand { name: String },

    #[error("command name must be a single lowercase word, got '{name}'")]
    InvalidCommandName { name: String },
}

/// Failure reported by a command handler. The dispatcher turns it into a
/// transcript message instead of letting it escape.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to format timestamp: {0}")]
    ClockFormat(#[from] time::error::Format),

    #[error("{0}")]
    Failed(String),
}

impl CommandError {
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("I/O error while reading profile at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse profile JSON at {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("profile field '{field}' must not be empty")]
    EmptyField { field: &'static str },
}

impl ProfileError {
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    #[must_use]
    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}

#[derive(Debug, Error)]
pub enum TriggerError {
    #[error("no console is listening for '{event}'")]
    NoListener { event: &'static str },

    #[error("failed to encode trigger payload: {0}")]
    Encode(#[from] serde_json::Error),
}
