use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use tracing::{debug, info, warn};

use super::Db;
use crate::errors::{PromptLibError, Result};

/// Longest accepted title, in characters, after trimming
pub const MAX_TITLE_LEN: usize = 40;

/// Opaque identifier of the user owning a prompt
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Prompt {
    pub id:         i64,
    pub title:      String,
    pub text:       String,
    pub user:       UserId,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Row shown in the management list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PromptSummary {
    pub id:    i64,
    pub title: String,
}

/// Title and text that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptDraft {
    pub title: String,
    pub text:  String,
}

impl PromptDraft {
    /// Trim and validate user input
    ///
    /// Checks run in order: empty title, title longer than
    /// [`MAX_TITLE_LEN`] characters, empty text.
    pub fn new(title: &str, text: &str) -> Result<Self> {
        let title = title.trim();
        let text = text.trim();

        if title.is_empty() {
            return Err(PromptLibError::ValidationError(
                "Title cannot be empty".to_string(),
            ));
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(PromptLibError::ValidationError(format!(
                "Title must be at most {} characters",
                MAX_TITLE_LEN
            )));
        }
        if text.is_empty() {
            return Err(PromptLibError::ValidationError(
                "Prompt cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            title: title.to_string(),
            text:  text.to_string(),
        })
    }
}

/// CRUD access to the `prompts` table
///
/// Every check-then-write runs inside a single transaction; the
/// `(user, title)` unique index backs up the duplicate check.
#[derive(Debug, Clone)]
pub struct PromptStore {
    pool: SqlitePool,
}

/// Check-then-write transactions take the write lock up front so
/// concurrent writers queue on the busy timeout instead of failing on
/// lock upgrade.
const WRITE_TRANSACTION: &str = "BEGIN IMMEDIATE";

impl PromptStore {
    pub fn new(db: &Db) -> Self {
        Self {
            pool: db.pool().clone(),
        }
    }

    /// Create a prompt owned by `user`
    ///
    /// # Errors
    /// - `ValidationError` for an empty/too long title or empty text
    /// - `DuplicateTitle` if `user` already has a prompt with this title
    pub async fn create(&self, user: &UserId, title: &str, text: &str) -> Result<Prompt> {
        let draft = PromptDraft::new(title, text)?;
        let mut tx = self.pool.begin_with(WRITE_TRANSACTION).await?;

        let existing: Option<i64> =
            sqlx::query_scalar("SELECT id FROM prompts WHERE user = ? AND title = ?")
                .bind(user)
                .bind(&draft.title)
                .fetch_optional(&mut *tx)
                .await?;

        if existing.is_some() {
            warn!(user = %user, title = %draft.title, "rejected duplicate prompt title");
            return Err(PromptLibError::DuplicateTitle { title: draft.title });
        }

        let now = Utc::now().timestamp();
        let result = sqlx::query(
            "INSERT INTO prompts (title, text, user, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&draft.title)
        .bind(&draft.text)
        .bind(user)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, &draft.title))?;

        tx.commit()
            .await
            .map_err(|e| map_unique_violation(e, &draft.title))?;

        let id = result.last_insert_rowid();
        info!(id, user = %user, "prompt created");

        Ok(Prompt {
            id,
            title: draft.title,
            text: draft.text,
            user: user.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    /// List `{id, title}` of every prompt owned by `user`, in storage order
    ///
    /// An unset user owns nothing.
    pub async fn list_by_user(&self, user: Option<&UserId>) -> Result<Vec<PromptSummary>> {
        let Some(user) = user else {
            return Ok(Vec::new());
        };

        let prompts = sqlx::query_as::<_, PromptSummary>(
            "SELECT id, title FROM prompts WHERE user = ? ORDER BY id",
        )
        .bind(user)
        .fetch_all(&self.pool)
        .await?;

        debug!(user = %user, count = prompts.len(), "listed prompts");
        Ok(prompts)
    }

    /// Full rows of every prompt owned by `user`, in storage order
    pub async fn list_prompts_by_user(&self, user: Option<&UserId>) -> Result<Vec<Prompt>> {
        let Some(user) = user else {
            return Ok(Vec::new());
        };

        let prompts = sqlx::query_as::<_, Prompt>(
            "SELECT id, title, text, user, created_at, updated_at
             FROM prompts WHERE user = ? ORDER BY id",
        )
        .bind(user)
        .fetch_all(&self.pool)
        .await?;

        Ok(prompts)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Prompt> {
        sqlx::query_as::<_, Prompt>(
            "SELECT id, title, text, user, created_at, updated_at FROM prompts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(PromptLibError::NotFound { id })
    }

    /// Replace title and text of prompt `id`; owner and id never change
    ///
    /// The new title must not collide with another prompt of the same
    /// owner. Keeping the current title is fine.
    pub async fn update(&self, id: i64, title: &str, text: &str) -> Result<Prompt> {
        let draft = PromptDraft::new(title, text)?;
        let mut tx = self.pool.begin_with(WRITE_TRANSACTION).await?;

        let current = sqlx::query_as::<_, Prompt>(
            "SELECT id, title, text, user, created_at, updated_at FROM prompts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(PromptLibError::NotFound { id })?;

        let clash: Option<i64> = sqlx::query_scalar(
            "SELECT id FROM prompts WHERE user = ? AND title = ? AND id != ?",
        )
        .bind(&current.user)
        .bind(&draft.title)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        if clash.is_some() {
            warn!(id, title = %draft.title, "rejected rename to an existing title");
            return Err(PromptLibError::DuplicateTitle { title: draft.title });
        }

        let now = Utc::now().timestamp();
        sqlx::query("UPDATE prompts SET title = ?, text = ?, updated_at = ? WHERE id = ?")
            .bind(&draft.title)
            .bind(&draft.text)
            .bind(now)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_unique_violation(e, &draft.title))?;

        tx.commit().await?;
        info!(id, "prompt updated");

        Ok(Prompt {
            title: draft.title,
            text: draft.text,
            updated_at: now,
            ..current
        })
    }

    /// Permanently remove prompt `id`
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM prompts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(PromptLibError::NotFound { id });
        }

        info!(id, "prompt deleted");
        Ok(())
    }

    /// Total number of stored prompts, all owners
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM prompts")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

fn map_unique_violation(err: sqlx::Error, title: &str) -> PromptLibError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            PromptLibError::DuplicateTitle {
                title: title.to_string(),
            }
        },
        _ => err.into(),
    }
}
