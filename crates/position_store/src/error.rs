use thiserror::Error;

/// Failure raised by a session storage backend.
///
/// Backends sit behind a narrow trait, so everything they can say about a
/// failure arrives as a message. Quota exhaustion, disabled storage and a
/// detached browsing context all surface this same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct StorageError {
    message: String,
}

impl StorageError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for StorageError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for StorageError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

#[derive(Debug, Error)]
pub enum PositionStoreError {
    #[error("failed to read '{key}' from session storage: {source}")]
    Read {
        key: String,
        #[source]
        source: StorageError,
    },

    #[error("failed to write '{key}' to session storage: {source}")]
    Write {
        key: String,
        #[source]
        source: StorageError,
    },

    #[error("stored positions under '{key}' are not decodable: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("positions for '{key}' are not encodable: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl PositionStoreError {
    pub(crate) fn read(key: &str, source: StorageError) -> Self {
        Self::Read {
            key: key.to_string(),
            source,
        }
    }

    pub(crate) fn write(key: &str, source: StorageError) -> Self {
        Self::Write {
            key: key.to_string(),
            source,
        }
    }

    pub(crate) fn decode(key: &str, source: serde_json::Error) -> Self {
        Self::Decode {
            key: key.to_string(),
            source,
        }
    }

    pub(crate) fn encode(key: &str, source: serde_json::Error) -> Self {
        Self::Encode {
            key: key.to_string(),
            source,
        }
    }
}
