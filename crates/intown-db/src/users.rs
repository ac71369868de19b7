//! Database operations for the `users` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// A row from the `users` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

/// Result of [`find_or_create_user`].
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UpsertedUser {
    #[sqlx(flatten)]
    pub user: UserRow,
    /// `true` when this call inserted the row.
    pub created: bool,
}

/// Returns the user with `phone`, creating one named `name` if none exists.
///
/// A single `INSERT … ON CONFLICT (phone)` statement, so concurrent logins
/// for the same phone converge on one row. The no-op `DO UPDATE` makes
/// `RETURNING` yield the existing row; `xmax = 0` distinguishes a fresh insert.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn find_or_create_user(
    pool: &PgPool,
    phone: &str,
    name: &str,
) -> Result<UpsertedUser, DbError> {
    let row = sqlx::query_as::<_, UpsertedUser>(
        "INSERT INTO users (id, name, phone) \
         VALUES ($1, $2, $3) \
         ON CONFLICT (phone) DO UPDATE SET phone = EXCLUDED.phone \
         RETURNING id, name, phone, created_at, (xmax = 0) AS created",
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(phone)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Returns the user with `phone`, or `None`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_user_by_phone(pool: &PgPool, phone: &str) -> Result<Option<UserRow>, DbError> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, name, phone, created_at FROM users WHERE phone = $1",
    )
    .bind(phone)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
