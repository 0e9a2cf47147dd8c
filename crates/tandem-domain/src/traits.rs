//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{Relationship, RelationshipId, RequestStatus, SafeProfile, UserId};
use std::collections::HashMap;

/// Coarse classification of store failures
///
/// The engine translates store errors into its caller-facing taxonomy, so
/// every store error type must say which invariant (if any) it violated.
/// `Other` covers transient infrastructure failures the caller may retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    /// A record already exists for this unordered pair
    DuplicatePair,

    /// Both sides of the pair are the same user
    SelfPair,

    /// No record with the given id
    NotFound,

    /// Current status does not permit the requested transition
    InvalidTransition,

    /// Transient infrastructure failure
    Other,
}

/// Classification hook for store error types
pub trait ClassifyError {
    /// Which invariant this error represents
    fn kind(&self) -> StoreErrorKind;
}

/// Trait for storing and retrieving relationship records
///
/// Implemented by the infrastructure layer (tandem-store).
///
/// Implementations must enforce at-most-one record per unordered pair even
/// under concurrent creation, and must guard `update_status` so two
/// concurrent reviews of the same pending record cannot both succeed.
pub trait RelationshipStore {
    /// Error type for store operations
    type Error: ClassifyError;

    /// Create a record with the given initiator, recipient, and status
    ///
    /// Fails with a self-pair error if `from == to`, or a duplicate-pair
    /// error if any record for the unordered pair already exists.
    fn create(
        &mut self,
        from: UserId,
        to: UserId,
        status: RequestStatus,
    ) -> Result<Relationship, Self::Error>;

    /// Get a record by id
    fn get(&self, id: RelationshipId) -> Result<Option<Relationship>, Self::Error>;

    /// Symmetric pair lookup: finds the record regardless of direction
    fn find_by_pair(&self, a: UserId, b: UserId) -> Result<Option<Relationship>, Self::Error>;

    /// Transition a record to a new status
    ///
    /// Fails with not-found if no record exists, or invalid-transition if
    /// the record's current status does not permit the target status.
    fn update_status(
        &mut self,
        id: RelationshipId,
        status: RequestStatus,
    ) -> Result<Relationship, Self::Error>;

    /// All records where the user appears on either side with one of the
    /// given statuses; unordered
    fn list_by_user(
        &self,
        user: UserId,
        statuses: &[RequestStatus],
    ) -> Result<Vec<Relationship>, Self::Error>;

    /// Remove a single record
    fn delete(&mut self, id: RelationshipId) -> Result<(), Self::Error>;

    /// Remove every record referencing the user; returns the count removed
    ///
    /// Used only by the account-deletion cascade.
    fn delete_by_user(&mut self, user: UserId) -> Result<usize, Self::Error>;
}

/// Read-only view of the identity collaborator
///
/// The engine consults identity data but never mutates it. All methods are
/// idempotent and side-effect-free.
pub trait IdentityDirectory {
    /// Error type for directory operations
    type Error;

    /// Whether a user with this id exists
    fn user_exists(&self, id: UserId) -> Result<bool, Self::Error>;

    /// Display-safe projection of a single user
    fn safe_profile(&self, id: UserId) -> Result<Option<SafeProfile>, Self::Error>;

    /// Bulk projection lookup; ids with no profile are simply absent from
    /// the result
    fn safe_profiles(
        &self,
        ids: &[UserId],
    ) -> Result<HashMap<UserId, SafeProfile>, Self::Error>;

    /// All user ids in a stable (creation-time) order
    ///
    /// Feed and search derive their candidate universe from this.
    fn list_user_ids(&self) -> Result<Vec<UserId>, Self::Error>;
}
