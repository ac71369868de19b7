//! Database operations for the `registrations` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationKind {
    Member,
    Merchant,
}

impl RegistrationKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RegistrationKind::Member => "member",
            RegistrationKind::Merchant => "merchant",
        }
    }
}

impl std::fmt::Display for RegistrationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row from the `registrations` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RegistrationRow {
    pub id: Uuid,
    pub kind: String,
    pub payload: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Stores a sign-up form verbatim.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_registration(
    pool: &PgPool,
    kind: RegistrationKind,
    payload: &serde_json::Value,
) -> Result<RegistrationRow, DbError> {
    let row = sqlx::query_as::<_, RegistrationRow>(
        "INSERT INTO registrations (id, kind, payload) \
         VALUES ($1, $2, $3) \
         RETURNING id, kind, payload, created_at",
    )
    .bind(Uuid::new_v4())
    .bind(kind.as_str())
    .bind(payload)
    .fetch_one(pool)
    .await?;

    Ok(row)
}
