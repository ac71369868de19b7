//! Database operations for the `payments` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// Input record for [`insert_payment`].
#[derive(Debug, Clone)]
pub struct NewPayment<'a> {
    pub user_id: &'a str,
    pub shop_id: Option<&'a str>,
    pub plan_id: Option<&'a str>,
    pub amount: f64,
    pub method: &'a str,
    pub transaction_id: &'a str,
    pub status: &'a str,
    pub savings: f64,
}

/// A row from the `payments` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PaymentRow {
    pub id: Uuid,
    pub user_id: String,
    pub shop_id: Option<String>,
    pub plan_id: Option<String>,
    pub amount: f64,
    pub method: String,
    pub transaction_id: String,
    pub status: String,
    pub savings: f64,
    pub created_at: DateTime<Utc>,
}

const PAYMENT_COLUMNS: &str = "id, user_id, shop_id, plan_id, amount, method, transaction_id, \
                               status, savings, created_at";

/// Inserts one payment and returns the stored row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_payment(pool: &PgPool, payment: &NewPayment<'_>) -> Result<PaymentRow, DbError> {
    let sql = format!(
        "INSERT INTO payments \
         (id, user_id, shop_id, plan_id, amount, method, transaction_id, status, savings) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
         RETURNING {PAYMENT_COLUMNS}"
    );
    let row = sqlx::query_as::<_, PaymentRow>(&sql)
        .bind(Uuid::new_v4())
        .bind(payment.user_id)
        .bind(payment.shop_id)
        .bind(payment.plan_id)
        .bind(payment.amount)
        .bind(payment.method)
        .bind(payment.transaction_id)
        .bind(payment.status)
        .bind(payment.savings)
        .fetch_one(pool)
        .await?;

    Ok(row)
}

/// Looks up a payment by its gateway transaction id.
///
/// Mock transaction ids are not unique; the most recent match wins.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_payment_by_transaction_id(
    pool: &PgPool,
    transaction_id: &str,
) -> Result<Option<PaymentRow>, DbError> {
    let sql = format!(
        "SELECT {PAYMENT_COLUMNS} FROM payments \
         WHERE transaction_id = $1 \
         ORDER BY created_at DESC \
         LIMIT 1"
    );
    let row = sqlx::query_as::<_, PaymentRow>(&sql)
        .bind(transaction_id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

/// Returns a user's payments, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_payments_for_user(
    pool: &PgPool,
    user_id: &str,
) -> Result<Vec<PaymentRow>, DbError> {
    let sql = format!(
        "SELECT {PAYMENT_COLUMNS} FROM payments \
         WHERE user_id = $1 \
         ORDER BY created_at DESC"
    );
    let rows = sqlx::query_as::<_, PaymentRow>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}
