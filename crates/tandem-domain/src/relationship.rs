//! Relationship record - the single record per interacting pair

use crate::{PairKey, RelationshipId, RequestStatus, UserId};
use serde::{Deserialize, Serialize};

/// A relationship record between two users
///
/// Exactly one record exists per unordered pair of users that have ever
/// interacted. The record is directed: `from_user` is the initiator of the
/// first-ever action between the pair and `to_user` the recipient. The
/// direction is preserved for the record's whole life, because only the
/// recipient may review a pending request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    /// Record identifier
    pub id: RelationshipId,

    /// Initiator of the first action between the pair
    pub from_user: UserId,

    /// Recipient of the first action
    pub to_user: UserId,

    /// Current status
    pub status: RequestStatus,

    /// When the record was created (seconds since Unix epoch)
    pub created_at: u64,

    /// When the record was last updated (seconds since Unix epoch)
    pub updated_at: u64,
}

impl Relationship {
    /// Create a new relationship record
    ///
    /// # Panics
    /// Panics if `from_user == to_user`; callers reject self-requests
    /// before constructing a record.
    pub fn new(
        id: RelationshipId,
        from_user: UserId,
        to_user: UserId,
        status: RequestStatus,
        created_at: u64,
    ) -> Self {
        assert_ne!(from_user, to_user, "Relationship members must be distinct");

        Self {
            id,
            from_user,
            to_user,
            status,
            created_at,
            updated_at: created_at,
        }
    }

    /// Canonical pair key for this record
    pub fn pair_key(&self) -> PairKey {
        PairKey::new(self.from_user, self.to_user)
    }

    /// Whether the given user is one side of this record
    pub fn involves(&self, user: UserId) -> bool {
        self.from_user == user || self.to_user == user
    }

    /// The other party, if `viewer` is one side of this record
    pub fn counterpart(&self, viewer: UserId) -> Option<UserId> {
        if viewer == self.from_user {
            Some(self.to_user)
        } else if viewer == self.to_user {
            Some(self.from_user)
        } else {
            None
        }
    }

    /// Whether this record represents an active connection
    pub fn is_connection(&self) -> bool {
        self.status == RequestStatus::Accepted
    }
}
