//! Identity rows and the IdentityDirectory implementation
//!
//! Identity is owned by an external collaborator in the larger system; this
//! module holds its narrow read interface plus the write helpers the CLI and
//! tests need (profile rows only, no credentials).

use crate::{SqliteStore, StoreError};
use rusqlite::{params, OptionalExtension};
use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};
use tandem_domain::traits::IdentityDirectory;
use tandem_domain::{SafeProfile, UserId};

fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

const PROFILE_COLUMNS: &str =
    "id, first_name, last_name, photo_url, age, gender, about, skills";

fn row_to_profile(row: &rusqlite::Row<'_>) -> rusqlite::Result<SafeProfile> {
    let id = SqliteStore::user_id_col(0, row.get(0)?)?;
    let skills_json: String = row.get(7)?;
    let skills: Vec<String> = serde_json::from_str(&skills_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            7,
            rusqlite::types::Type::Text,
            Box::new(e),
        )
    })?;

    Ok(SafeProfile {
        id,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        photo_url: row.get(3)?,
        age: row.get::<_, Option<i64>>(4)?.map(|a| a as u8),
        gender: row.get(5)?,
        about: row.get(6)?,
        skills,
    })
}

impl SqliteStore {
    /// Insert an identity row for the given profile
    ///
    /// Write access used by the CLI and tests; the engine itself never
    /// creates users.
    pub fn create_user(&mut self, profile: &SafeProfile) -> Result<(), StoreError> {
        let skills = serde_json::to_string(&profile.skills)
            .map_err(|e| StoreError::InvalidData(e.to_string()))?;

        self.conn_mut().execute(
            "INSERT INTO users
                 (id, first_name, last_name, photo_url, age, gender, about, skills, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                profile.id.to_string(),
                profile.first_name,
                profile.last_name,
                profile.photo_url,
                profile.age.map(|a| a as i64),
                profile.gender,
                profile.about,
                skills,
                current_timestamp() as i64,
            ],
        )?;

        Ok(())
    }

    /// Remove a user's identity row along with every relationship
    /// referencing them, as one atomic unit
    ///
    /// Relationships are purged first so a crash mid-cascade can never
    /// leave a relationship pointing at a missing user.
    pub fn delete_account(&mut self, user: UserId) -> Result<usize, StoreError> {
        let tx = self.conn_mut().transaction()?;

        let removed = tx.execute(
            "DELETE FROM relationships WHERE from_user = ?1 OR to_user = ?1",
            params![user.to_string()],
        )?;
        let users = tx.execute("DELETE FROM users WHERE id = ?1", params![user.to_string()])?;

        if users == 0 {
            // Roll back the relationship purge; the caller named a user
            // that does not exist.
            drop(tx);
            return Err(StoreError::NotFound(format!("user {}", user)));
        }

        tx.commit()?;
        Ok(removed)
    }
}

impl IdentityDirectory for SqliteStore {
    type Error = StoreError;

    fn user_exists(&self, id: UserId) -> Result<bool, Self::Error> {
        let exists = self
            .conn()
            .query_row(
                "SELECT 1 FROM users WHERE id = ?1",
                params![id.to_string()],
                |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false);

        Ok(exists)
    }

    fn safe_profile(&self, id: UserId) -> Result<Option<SafeProfile>, Self::Error> {
        let profile = self
            .conn()
            .query_row(
                &format!("SELECT {} FROM users WHERE id = ?1", PROFILE_COLUMNS),
                params![id.to_string()],
                row_to_profile,
            )
            .optional()?;

        Ok(profile)
    }

    fn safe_profiles(
        &self,
        ids: &[UserId],
    ) -> Result<HashMap<UserId, SafeProfile>, Self::Error> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let placeholders = (1..=ids.len())
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "SELECT {} FROM users WHERE id IN ({})",
            PROFILE_COLUMNS, placeholders
        );

        let params: Vec<Box<dyn rusqlite::ToSql>> = ids
            .iter()
            .map(|id| Box::new(id.to_string()) as Box<dyn rusqlite::ToSql>)
            .collect();
        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let mut stmt = self.conn().prepare(&sql)?;
        let profiles = stmt
            .query_map(&param_refs[..], row_to_profile)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(profiles.into_iter().map(|p| (p.id, p)).collect())
    }

    fn list_user_ids(&self) -> Result<Vec<UserId>, Self::Error> {
        let mut stmt = self
            .conn()
            .prepare("SELECT id FROM users ORDER BY created_at, id")?;

        let ids = stmt
            .query_map([], |row| SqliteStore::user_id_col(0, row.get(0)?))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ids)
    }
}
