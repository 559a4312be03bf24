//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`TriggerError`]
//! via `From`. The `Display` text of the domain variants is part of the HTTP
//! contract: it is returned verbatim in `{"error": ...}` bodies.

/// Top-level error returned by application services and repository ports.
#[derive(Debug, thiserror::Error)]
pub enum TriggerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// A failure reaching the document store.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Payload did not satisfy the operation's requirements.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A schedule submission lacked one or more of `day`, `timeOn`, `timeOff`.
    #[error("Missing required keys in data")]
    MissingScheduleKeys(Vec<&'static str>),
}

/// The requested record does not exist in the collection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Item not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}
