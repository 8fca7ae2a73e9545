//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;

/// Errors from the authenticated REST client.
///
/// Only `Unauthorized` is terminal for the active flow: the stored token has
/// already been invalidated and the user must re-authenticate. Everything
/// else is surfaced to the user and retried only on their explicit action.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("not authenticated")]
    Unauthorized,

    #[error("request failed with status {0}")]
    Status(reqwest::StatusCode),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Credentials(#[from] StorageError),

    #[error("invalid api base url: {0}")]
    InvalidBaseUrl(String),

    #[error("unexpected payload: {0}")]
    Decode(String),
}

impl ApiError {
    /// Whether the user may sensibly retry the same request.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        !matches!(self, ApiError::Unauthorized)
    }
}

/// Errors emitted by the quiz session subsystem.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("quiz has no questions")]
    Empty,

    #[error("submission already completed")]
    Completed,

    #[error("a submission is already in flight")]
    InFlight,

    #[error("incomplete answers require confirmation, not in the confirmation step")]
    NotConfirming,

    #[error("no submission was requested")]
    NotSubmitting,

    #[error(transparent)]
    Api(#[from] ApiError),
}
