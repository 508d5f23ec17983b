//! Error taxonomy for the ingestion pipeline.
//!
//! Every variant ends up as a message handed to the caller's `on_error`
//! callback; none of them is fatal.

use thiserror::Error;

/// Message used when a download fails without any detail from the client.
pub const FETCH_FALLBACK_MESSAGE: &str = "Could not download the dropped image";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    /// Malformed or unreadable transfer data. Recovered locally as an empty drop.
    #[error("could not read dropped data: {0}")]
    ClassificationFailure(String),

    /// Files were dropped but none of them satisfies the acceptance policy.
    #[error("No valid image files found")]
    PolicyRejection,

    /// A dropped URL does not look like an image resource.
    #[error("The dropped link does not look like an image: {0}")]
    InvalidReference(String),

    /// Network failure or non-success status while downloading a remote reference.
    #[error("{}", .0.as_deref().unwrap_or(FETCH_FALLBACK_MESSAGE))]
    FetchFailed(Option<String>),
}

impl IngestError {
    /// The string handed to `on_error`.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    pub fn fetch_failed(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            IngestError::FetchFailed(None)
        } else {
            IngestError::FetchFailed(Some(message))
        }
    }
}
