//! Core engine: request lifecycle, connections, and the deletion cascade

use crate::{EngineConfig, EngineError};
use std::fmt::Display;
use tandem_domain::traits::{IdentityDirectory, RelationshipStore};
use tandem_domain::{Relationship, RelationshipId, RequestStatus, SafeProfile, UserId};
use tracing::{debug, info};

/// The connection-graph engine
///
/// Holds only policy configuration; storage is passed into every operation.
/// One store type implements both `RelationshipStore` (the relationship
/// records the engine owns) and `IdentityDirectory` (the read-only identity
/// collaborator).
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Create an engine with the given configuration
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Create an engine with default configuration
    pub fn default_config() -> Self {
        Self::new(EngineConfig::default())
    }

    /// Get the active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Record a first interaction between `actor` and `target`
    ///
    /// `initial` must be `Interested` or `Ignored`. Fails with
    /// `SelfRequest` if actor and target are the same user,
    /// `TargetNotFound` if the target does not exist, and
    /// `DuplicateRelationship` if any record for the pair already exists,
    /// in either direction.
    pub fn send_request<S>(
        &self,
        store: &mut S,
        actor: UserId,
        target: UserId,
        initial: RequestStatus,
    ) -> Result<Relationship, EngineError>
    where
        S: RelationshipStore + IdentityDirectory,
        <S as RelationshipStore>::Error: Display,
        <S as IdentityDirectory>::Error: Display,
    {
        if !initial.is_initial() {
            return Err(EngineError::InvalidStatus(initial.as_str().to_string()));
        }
        if actor == target {
            return Err(EngineError::SelfRequest);
        }

        let target_exists = store
            .user_exists(target)
            .map_err(EngineError::from_directory)?;
        if !target_exists {
            return Err(EngineError::TargetNotFound);
        }

        if store
            .find_by_pair(actor, target)
            .map_err(EngineError::from_store)?
            .is_some()
        {
            return Err(EngineError::DuplicateRelationship);
        }

        let record = store
            .create(actor, target, initial)
            .map_err(EngineError::from_store)?;

        info!(%actor, %target, status = %initial, "connection request recorded");
        Ok(record)
    }

    /// Review a pending request as its recipient
    ///
    /// `decision` must be `Accepted` or `Rejected`. Only the record's
    /// `to_user` may review (`Forbidden` otherwise), and only a record
    /// currently `Interested` may transition (`InvalidTransition`
    /// otherwise). Terminal records are never transitioned again.
    pub fn review_request<S>(
        &self,
        store: &mut S,
        actor: UserId,
        request_id: RelationshipId,
        decision: RequestStatus,
    ) -> Result<Relationship, EngineError>
    where
        S: RelationshipStore,
        S::Error: Display,
    {
        if !decision.is_decision() {
            return Err(EngineError::InvalidStatus(decision.as_str().to_string()));
        }

        let record = store
            .get(request_id)
            .map_err(EngineError::from_store)?
            .ok_or(EngineError::NotFound)?;

        if record.to_user != actor {
            return Err(EngineError::Forbidden);
        }
        if !record.status.can_transition_to(decision) {
            return Err(EngineError::InvalidTransition);
        }

        let updated = store
            .update_status(request_id, decision)
            .map_err(EngineError::from_store)?;

        info!(%actor, request = %request_id, decision = %decision, "request reviewed");
        Ok(updated)
    }

    /// Pending requests sent *to* the actor, with each requester's profile
    pub fn list_received_requests<S>(
        &self,
        store: &S,
        actor: UserId,
    ) -> Result<Vec<(Relationship, SafeProfile)>, EngineError>
    where
        S: RelationshipStore + IdentityDirectory,
        <S as RelationshipStore>::Error: Display,
        <S as IdentityDirectory>::Error: Display,
    {
        let pending = store
            .list_by_user(actor, &[RequestStatus::Interested])
            .map_err(EngineError::from_store)?;

        let received: Vec<Relationship> = pending
            .into_iter()
            .filter(|r| r.to_user == actor)
            .collect();

        self.hydrate_counterparts(store, actor, received)
    }

    /// Pending requests sent *by* the actor, with each target's profile
    pub fn list_sent_requests<S>(
        &self,
        store: &S,
        actor: UserId,
    ) -> Result<Vec<(Relationship, SafeProfile)>, EngineError>
    where
        S: RelationshipStore + IdentityDirectory,
        <S as RelationshipStore>::Error: Display,
        <S as IdentityDirectory>::Error: Display,
    {
        let pending = store
            .list_by_user(actor, &[RequestStatus::Interested])
            .map_err(EngineError::from_store)?;

        let sent: Vec<Relationship> = pending
            .into_iter()
            .filter(|r| r.from_user == actor)
            .collect();

        self.hydrate_counterparts(store, actor, sent)
    }

    /// The actor's active connections, as the *other* party's profile
    ///
    /// An `Accepted` record is the sole basis for a connection; no other
    /// status qualifies.
    pub fn list_connections<S>(
        &self,
        store: &S,
        actor: UserId,
    ) -> Result<Vec<SafeProfile>, EngineError>
    where
        S: RelationshipStore + IdentityDirectory,
        <S as RelationshipStore>::Error: Display,
        <S as IdentityDirectory>::Error: Display,
    {
        let accepted = store
            .list_by_user(actor, &[RequestStatus::Accepted])
            .map_err(EngineError::from_store)?;

        let hydrated = self.hydrate_counterparts(store, actor, accepted)?;
        Ok(hydrated.into_iter().map(|(_, profile)| profile).collect())
    }

    /// Sever the accepted connection between `actor` and `other`
    ///
    /// Deletes the record outright: afterward the pair has no relationship
    /// record at all, becomes mutually re-discoverable, and a fresh request
    /// between them is permitted again. Either party may initiate removal.
    pub fn remove_connection<S>(
        &self,
        store: &mut S,
        actor: UserId,
        other: UserId,
    ) -> Result<(), EngineError>
    where
        S: RelationshipStore,
        S::Error: Display,
    {
        let record = store
            .find_by_pair(actor, other)
            .map_err(EngineError::from_store)?
            .ok_or(EngineError::NotFound)?;

        if record.status != RequestStatus::Accepted {
            return Err(EngineError::NotFound);
        }

        store.delete(record.id).map_err(EngineError::from_store)?;

        info!(%actor, %other, "connection removed");
        Ok(())
    }

    /// Account-deletion cascade entry point
    ///
    /// Purges every relationship record referencing the user. Invoked by
    /// the profile-management collaborator before (or within the same
    /// atomic unit as) its removal of the identity record, so no record
    /// ever references a missing user.
    pub fn on_account_deleted<S>(&self, store: &mut S, user: UserId) -> Result<usize, EngineError>
    where
        S: RelationshipStore,
        S::Error: Display,
    {
        let removed = store
            .delete_by_user(user)
            .map_err(EngineError::from_store)?;

        info!(%user, removed, "relationship records purged for deleted account");
        Ok(removed)
    }

    /// Resolve each record's counterpart profile, preserving record order
    ///
    /// A record whose counterpart has no profile is dropped rather than
    /// surfaced: a relationship referencing a missing user is treated as
    /// absent by every query.
    fn hydrate_counterparts<S>(
        &self,
        store: &S,
        viewer: UserId,
        records: Vec<Relationship>,
    ) -> Result<Vec<(Relationship, SafeProfile)>, EngineError>
    where
        S: IdentityDirectory,
        S::Error: Display,
    {
        let counterparts: Vec<UserId> = records
            .iter()
            .filter_map(|r| r.counterpart(viewer))
            .collect();

        let mut profiles = store
            .safe_profiles(&counterparts)
            .map_err(EngineError::from_directory)?;

        let hydrated: Vec<(Relationship, SafeProfile)> = records
            .into_iter()
            .filter_map(|record| {
                let other = record.counterpart(viewer)?;
                profiles.remove(&other).map(|profile| (record, profile))
            })
            .collect();

        debug!(viewer = %viewer, count = hydrated.len(), "hydrated counterpart profiles");
        Ok(hydrated)
    }
}
