use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// The persisted login state: one bearer token and who it belongs to.
///
/// There is at most one credential set per installation. It is written on
/// login, read on every API call, and cleared when the server answers 401.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub user_name: String,
    pub role: String,
    pub saved_at: DateTime<Utc>,
}

/// Repository contract for the persisted credentials.
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// Fetch the stored credentials, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn load(&self) -> Result<Option<Credentials>, StorageError>;

    /// Persist credentials, replacing any previous set.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be written.
    async fn save(&self, credentials: &Credentials) -> Result<(), StorageError>;

    /// Remove the stored credentials. A no-op when none exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be written.
    async fn clear(&self) -> Result<(), StorageError>;
}

/// Simple in-memory credential store for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryCredentialStore {
    inner: Arc<Mutex<Option<Credentials>>>,
}

impl InMemoryCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor with a token already present.
    #[must_use]
    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Some(credentials))),
        }
    }
}

#[async_trait]
impl CredentialRepository for InMemoryCredentialStore {
    async fn load(&self) -> Result<Option<Credentials>, StorageError> {
        let guard = self
            .inner
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn save(&self, credentials: &Credentials) -> Result<(), StorageError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(credentials.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = None;
        Ok(())
    }
}
