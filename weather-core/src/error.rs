//! Typed failures returned across the client and store boundaries.
//!
//! None of these are fatal: the app either shows a short inline message
//! (`FetchError`) or logs and carries on (`PersistenceError`, `StoreError`).

use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single weather lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("City name cannot be empty")]
    EmptyQuery,

    /// Network failure, unknown city, or a payload that did not match the expected shape.
    #[error("{0}")]
    Provider(String),
}

impl FetchError {
    /// Text shown inline on the search screen.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::EmptyQuery => self.to_string(),
            FetchError::Provider(msg) => format!("Unable to fetch weather data: {msg}"),
        }
    }
}

/// Local storage read/write failure.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize entries: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to parse stored entries: {0}")]
    Deserialize(#[source] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("An entry with id '{0}' already exists")]
    DuplicateId(String),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
