//! Error types shared across the service.
//!
//! Client-caused failures (`Validation`, `Auth`) are distinguishable from
//! internal ones (`Conflict`, `Storage`, `Encoding`) so the transport can
//! answer with the right wire code instead of coercing everything into a
//! generic failure. `DeliveryError` never leaves the broadcaster.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    /// Bad client input, e.g. an empty or oversized message body.
    #[error("invalid message: {0}")]
    Validation(String),

    /// Missing, malformed, or expired credential, or a failed identity
    /// resolution.
    #[error("unauthorized: {0}")]
    Auth(String),

    /// An order key was already present in the store. Order keys are unique
    /// by construction, so this is an invariant violation and must fail the
    /// request loudly rather than be retried.
    #[error("order key already present in store: {key}")]
    Conflict { key: String },

    #[error("storage failure: {0}")]
    Storage(#[from] sled::Error),

    #[error("encoding failure: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl FeedError {
    /// Stable wire code for the error, sent to clients alongside the
    /// human-readable message.
    pub fn code(&self) -> &'static str {
        match self {
            FeedError::Validation(_) => "validation",
            FeedError::Auth(_) => "auth",
            FeedError::Conflict { .. } => "conflict",
            FeedError::Storage(_) => "storage",
            FeedError::Encoding(_) => "encoding",
        }
    }
}

/// A push to a single subscriber failed. Handled entirely inside the
/// broadcaster: the subscriber is closed and removed, the caller of
/// `publish` never sees it.
#[derive(Debug, Error)]
#[error("delivery to subscriber {subscriber_id} failed")]
pub struct DeliveryError {
    pub subscriber_id: String,
}
