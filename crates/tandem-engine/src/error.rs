//! Engine error taxonomy
//!
//! Every variant except `Store` is an expected, recoverable outcome the
//! caller translates into a user-facing response. `Store` is a transient
//! infrastructure failure; retrying it belongs to the caller, never to the
//! engine.

use tandem_domain::traits::{ClassifyError, StoreErrorKind};
use thiserror::Error;

/// Errors returned by engine operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Actor targeted themselves
    #[error("Cannot send a request to yourself")]
    SelfRequest,

    /// The targeted user does not exist
    #[error("Target user not found")]
    TargetNotFound,

    /// A relationship already exists for this pair, in either direction
    #[error("A relationship already exists for this pair")]
    DuplicateRelationship,

    /// No such relationship or connection
    #[error("Not found")]
    NotFound,

    /// The record's current status does not permit the requested change
    #[error("Current status does not permit this transition")]
    InvalidTransition,

    /// The actor is not the authorized party for this transition
    #[error("Not authorized to act on this request")]
    Forbidden,

    /// The caller passed a status that is not legal for this operation
    #[error("Invalid status for this operation: {0}")]
    InvalidStatus(String),

    /// Transient storage failure; the caller may retry
    #[error("Storage error: {0}")]
    Store(String),
}

impl EngineError {
    /// Translate a relationship-store error into the engine taxonomy
    pub(crate) fn from_store<E: ClassifyError + std::fmt::Display>(e: E) -> Self {
        match e.kind() {
            StoreErrorKind::DuplicatePair => EngineError::DuplicateRelationship,
            StoreErrorKind::SelfPair => EngineError::SelfRequest,
            StoreErrorKind::NotFound => EngineError::NotFound,
            StoreErrorKind::InvalidTransition => EngineError::InvalidTransition,
            StoreErrorKind::Other => EngineError::Store(e.to_string()),
        }
    }

    /// Translate an identity-directory error; directory reads have no
    /// domain-level failure modes, so everything is transient
    pub(crate) fn from_directory<E: std::fmt::Display>(e: E) -> Self {
        EngineError::Store(e.to_string())
    }
}
