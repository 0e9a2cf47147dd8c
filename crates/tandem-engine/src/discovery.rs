//! Discovery: the exclusion-filtered feed and the search filter
//!
//! Feed and search share the same candidate universe (every user minus the
//! viewer and their exclusion set) but apply deliberately different
//! exclusion predicates:
//!
//! - The feed excludes every counterpart in ANY relationship, regardless of
//!   status. Once any interaction exists between two users, neither appears
//!   in the other's feed again; the feed only ever shrinks.
//! - Search excludes only `interested` and `accepted` counterparts, so a
//!   user can deliberately re-find someone they previously ignored (or who
//!   rejected them).
//!
//! The divergence is intentional, kept as two separate predicates so it
//! stays explicit and testable.

use crate::config::SearchField;
use crate::{Engine, EngineError};
use std::collections::HashSet;
use std::fmt::Display;
use tandem_domain::traits::{IdentityDirectory, RelationshipStore};
use tandem_domain::{RequestStatus, SafeProfile, UserId};
use tracing::debug;

/// Statuses whose counterparts stay hidden from search
const SEARCH_EXCLUDED_STATUSES: [RequestStatus; 2] =
    [RequestStatus::Interested, RequestStatus::Accepted];

impl Engine {
    /// Paginated discovery feed for `viewer`
    ///
    /// `page` is 1-indexed (zero is treated as the first page); `limit` is
    /// clamped to the configured maximum, and a zero limit falls back to
    /// the configured default. Candidates are returned in the directory's
    /// stable order.
    pub fn feed<S>(
        &self,
        store: &S,
        viewer: UserId,
        page: usize,
        limit: usize,
    ) -> Result<Vec<SafeProfile>, EngineError>
    where
        S: RelationshipStore + IdentityDirectory,
        <S as RelationshipStore>::Error: Display,
        <S as IdentityDirectory>::Error: Display,
    {
        let page = page.max(1);
        let limit = if limit == 0 {
            self.config().default_page_size
        } else {
            limit.min(self.config().max_page_size)
        };
        let skip = (page - 1) * limit;

        let excluded = self.exclusions(store, viewer, &RequestStatus::ALL)?;
        let candidates: Vec<UserId> = store
            .list_user_ids()
            .map_err(EngineError::from_directory)?
            .into_iter()
            .filter(|id| !excluded.contains(id))
            .skip(skip)
            .take(limit)
            .collect();

        debug!(%viewer, page, limit, count = candidates.len(), "feed page assembled");
        self.hydrate_in_order(store, &candidates)
    }

    /// Text search over the not-excluded, not-self candidate universe
    ///
    /// An empty or whitespace-only query yields an empty result set.
    /// Matching is case-insensitive substring over the configured fields;
    /// a candidate matches if any field matches.
    pub fn search<S>(
        &self,
        store: &S,
        viewer: UserId,
        query: &str,
    ) -> Result<Vec<SafeProfile>, EngineError>
    where
        S: RelationshipStore + IdentityDirectory,
        <S as RelationshipStore>::Error: Display,
        <S as IdentityDirectory>::Error: Display,
    {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        let excluded = self.exclusions(store, viewer, &SEARCH_EXCLUDED_STATUSES)?;
        let candidates: Vec<UserId> = store
            .list_user_ids()
            .map_err(EngineError::from_directory)?
            .into_iter()
            .filter(|id| !excluded.contains(id))
            .collect();

        let profiles = self.hydrate_in_order(store, &candidates)?;
        let matches: Vec<SafeProfile> = profiles
            .into_iter()
            .filter(|p| self.matches_query(p, &needle))
            .collect();

        debug!(%viewer, query = %needle, count = matches.len(), "search completed");
        Ok(matches)
    }

    /// The viewer plus every counterpart in a relationship with one of the
    /// given statuses
    fn exclusions<S>(
        &self,
        store: &S,
        viewer: UserId,
        statuses: &[RequestStatus],
    ) -> Result<HashSet<UserId>, EngineError>
    where
        S: RelationshipStore,
        S::Error: Display,
    {
        let mut excluded = HashSet::new();
        excluded.insert(viewer);

        for record in store
            .list_by_user(viewer, statuses)
            .map_err(EngineError::from_store)?
        {
            excluded.insert(record.from_user);
            excluded.insert(record.to_user);
        }

        Ok(excluded)
    }

    /// Bulk-hydrate profiles, preserving candidate order and dropping ids
    /// with no profile
    fn hydrate_in_order<S>(
        &self,
        store: &S,
        ids: &[UserId],
    ) -> Result<Vec<SafeProfile>, EngineError>
    where
        S: IdentityDirectory,
        S::Error: Display,
    {
        let mut profiles = store
            .safe_profiles(ids)
            .map_err(EngineError::from_directory)?;

        Ok(ids.iter().filter_map(|id| profiles.remove(id)).collect())
    }

    /// Case-insensitive substring match over the configured fields
    fn matches_query(&self, profile: &SafeProfile, needle: &str) -> bool {
        self.config().search_fields.iter().any(|field| match field {
            SearchField::Name => {
                profile.first_name.to_lowercase().contains(needle)
                    || profile
                        .last_name
                        .as_deref()
                        .is_some_and(|l| l.to_lowercase().contains(needle))
            }
            SearchField::Skills => profile
                .skills
                .iter()
                .any(|s| s.to_lowercase().contains(needle)),
            SearchField::About => profile
                .about
                .as_deref()
                .is_some_and(|a| a.to_lowercase().contains(needle)),
        })
    }
}
