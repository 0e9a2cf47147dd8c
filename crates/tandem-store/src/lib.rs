//! Tandem Storage Layer
//!
//! Implements the RelationshipStore and IdentityDirectory traits over SQLite.
//!
//! # Architecture
//!
//! - One `relationships` row per unordered pair of users, keyed by the
//!   canonicalized pair (ids sorted into `pair_lo`/`pair_hi`) with a unique
//!   index, so two racing "send request" calls cannot both land
//! - Direction of the first action preserved in `from_user`/`to_user`
//! - Status transitions guarded by a conditional UPDATE, so two racing
//!   reviews cannot both succeed
//!
//! # Examples
//!
//! ```no_run
//! use tandem_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for relationship operations
//! ```

#![warn(missing_docs)]

pub mod identity;

use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use tandem_domain::traits::{ClassifyError, RelationshipStore, StoreErrorKind};
use tandem_domain::{PairKey, Relationship, RelationshipId, RequestStatus, UserId};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A relationship already exists for this pair of users
    #[error("A relationship already exists for this pair")]
    DuplicatePair,

    /// Both sides of the pair are the same user
    #[error("A user cannot have a relationship with themselves")]
    SelfPair,

    /// Record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Current status does not permit the requested transition
    #[error("Invalid transition: {current} does not permit {requested}")]
    InvalidTransition {
        /// The record's current status
        current: RequestStatus,
        /// The status the caller asked for
        requested: RequestStatus,
    },

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl ClassifyError for StoreError {
    fn kind(&self) -> StoreErrorKind {
        match self {
            StoreError::DuplicatePair => StoreErrorKind::DuplicatePair,
            StoreError::SelfPair => StoreErrorKind::SelfPair,
            StoreError::NotFound(_) => StoreErrorKind::NotFound,
            StoreError::InvalidTransition { .. } => StoreErrorKind::InvalidTransition,
            StoreError::Database(_) | StoreError::InvalidData(_) => StoreErrorKind::Other,
        }
    }
}

/// Current timestamp in seconds since Unix epoch
fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

/// SQLite-based implementation of RelationshipStore and IdentityDirectory
///
/// This store provides persistent storage for relationship records and the
/// identity rows the feed/search candidate universe is drawn from.
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own
/// SqliteStore instance; cross-process writers are still serialized by the
/// unique pair index and the conditional status UPDATE.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use tandem_store::SqliteStore;
    ///
    /// let store = SqliteStore::new("tandem.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    pub(crate) fn conn_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// Map a TEXT column to a UserId inside a row-mapping closure
    pub(crate) fn user_id_col(idx: usize, value: String) -> rusqlite::Result<UserId> {
        UserId::from_string(&value).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, e.into())
        })
    }

    /// Map a TEXT column to a RelationshipId inside a row-mapping closure
    fn relationship_id_col(idx: usize, value: String) -> rusqlite::Result<RelationshipId> {
        RelationshipId::from_string(&value).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, e.into())
        })
    }

    /// Map a TEXT column to a RequestStatus inside a row-mapping closure
    fn status_col(idx: usize, value: String) -> rusqlite::Result<RequestStatus> {
        RequestStatus::parse(&value).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                rusqlite::types::Type::Text,
                format!("Unknown status: {}", value).into(),
            )
        })
    }

    /// Row mapper for the standard relationship column order:
    /// id, from_user, to_user, status, created_at, updated_at
    fn row_to_relationship(row: &rusqlite::Row<'_>) -> rusqlite::Result<Relationship> {
        let id = Self::relationship_id_col(0, row.get(0)?)?;
        let from_user = Self::user_id_col(1, row.get(1)?)?;
        let to_user = Self::user_id_col(2, row.get(2)?)?;
        let status = Self::status_col(3, row.get(3)?)?;

        Ok(Relationship {
            id,
            from_user,
            to_user,
            status,
            created_at: row.get::<_, i64>(4)? as u64,
            updated_at: row.get::<_, i64>(5)? as u64,
        })
    }
}

const RELATIONSHIP_COLUMNS: &str = "id, from_user, to_user, status, created_at, updated_at";

impl RelationshipStore for SqliteStore {
    type Error = StoreError;

    fn create(
        &mut self,
        from: UserId,
        to: UserId,
        status: RequestStatus,
    ) -> Result<Relationship, Self::Error> {
        if from == to {
            return Err(StoreError::SelfPair);
        }

        if self.find_by_pair(from, to)?.is_some() {
            return Err(StoreError::DuplicatePair);
        }

        let pair = PairKey::new(from, to);
        let record = Relationship::new(RelationshipId::new(), from, to, status, current_timestamp());

        let inserted = self.conn.execute(
            "INSERT INTO relationships
                 (id, pair_lo, pair_hi, from_user, to_user, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                record.id.to_string(),
                pair.lo().to_string(),
                pair.hi().to_string(),
                record.from_user.to_string(),
                record.to_user.to_string(),
                record.status.as_str(),
                record.created_at as i64,
                record.updated_at as i64,
            ],
        );

        match inserted {
            Ok(_) => Ok(record),
            // A writer that raced us past the find_by_pair check trips the
            // unique pair index; surface it as the duplicate it is.
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(StoreError::DuplicatePair)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn get(&self, id: RelationshipId) -> Result<Option<Relationship>, Self::Error> {
        let record = self
            .conn
            .query_row(
                &format!(
                    "SELECT {} FROM relationships WHERE id = ?1",
                    RELATIONSHIP_COLUMNS
                ),
                params![id.to_string()],
                Self::row_to_relationship,
            )
            .optional()?;

        Ok(record)
    }

    fn find_by_pair(&self, a: UserId, b: UserId) -> Result<Option<Relationship>, Self::Error> {
        if a == b {
            return Ok(None);
        }

        let pair = PairKey::new(a, b);
        let record = self
            .conn
            .query_row(
                &format!(
                    "SELECT {} FROM relationships WHERE pair_lo = ?1 AND pair_hi = ?2",
                    RELATIONSHIP_COLUMNS
                ),
                params![pair.lo().to_string(), pair.hi().to_string()],
                Self::row_to_relationship,
            )
            .optional()?;

        Ok(record)
    }

    fn update_status(
        &mut self,
        id: RelationshipId,
        status: RequestStatus,
    ) -> Result<Relationship, Self::Error> {
        let current = self
            .get(id)?
            .ok_or_else(|| StoreError::NotFound(format!("relationship {}", id)))?;

        if !current.status.can_transition_to(status) {
            return Err(StoreError::InvalidTransition {
                current: current.status,
                requested: status,
            });
        }

        // The WHERE clause re-checks the status so a review that raced us
        // affects zero rows instead of clobbering the winner's decision.
        let changed = self.conn.execute(
            "UPDATE relationships SET status = ?2, updated_at = ?3
             WHERE id = ?1 AND status = ?4",
            params![
                id.to_string(),
                status.as_str(),
                current_timestamp() as i64,
                current.status.as_str(),
            ],
        )?;

        if changed == 0 {
            return match self.get(id)? {
                None => Err(StoreError::NotFound(format!("relationship {}", id))),
                Some(record) => Err(StoreError::InvalidTransition {
                    current: record.status,
                    requested: status,
                }),
            };
        }

        self.get(id)?
            .ok_or_else(|| StoreError::NotFound(format!("relationship {}", id)))
    }

    fn list_by_user(
        &self,
        user: UserId,
        statuses: &[RequestStatus],
    ) -> Result<Vec<Relationship>, Self::Error> {
        if statuses.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = (2..=statuses.len() + 1)
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "SELECT {} FROM relationships
             WHERE (from_user = ?1 OR to_user = ?1) AND status IN ({})",
            RELATIONSHIP_COLUMNS, placeholders
        );

        let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(user.to_string())];
        for status in statuses {
            params.push(Box::new(status.as_str()));
        }
        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let mut stmt = self.conn.prepare(&sql)?;
        let records = stmt
            .query_map(&param_refs[..], Self::row_to_relationship)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    fn delete(&mut self, id: RelationshipId) -> Result<(), Self::Error> {
        let removed = self.conn.execute(
            "DELETE FROM relationships WHERE id = ?1",
            params![id.to_string()],
        )?;

        if removed == 0 {
            return Err(StoreError::NotFound(format!("relationship {}", id)));
        }

        Ok(())
    }

    fn delete_by_user(&mut self, user: UserId) -> Result<usize, Self::Error> {
        let removed = self.conn.execute(
            "DELETE FROM relationships WHERE from_user = ?1 OR to_user = ?1",
            params![user.to_string()],
        )?;

        Ok(removed)
    }
}
