//! PostgreSQL implementation of SubscriptionStore.
//!
//! Provides persistent storage for Subscription aggregates using PostgreSQL.

use crate::domain::foundation::{DomainError, ErrorCode, SubscriptionId, Timestamp};
use crate::domain::subscription::{Subscription, SubscriptionStatus};
use crate::ports::SubscriptionStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL implementation of the SubscriptionStore port.
///
/// Uses sqlx for type-safe database operations with connection pooling.
pub struct PostgresSubscriptionStore {
    pool: PgPool,
}

impl PostgresSubscriptionStore {
    /// Creates a new PostgresSubscriptionStore with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a subscription.
#[derive(Debug, sqlx::FromRow)]
struct SubscriptionRow {
    id: Uuid,
    identification: String,
    status: String,
    installments_paid: i32,
    total_installments: i32,
    last_payment_date: Option<DateTime<Utc>>,
    next_payment_date: Option<DateTime<Utc>>,
    initial_transaction_id: Option<String>,
    response_data: Option<Value>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SubscriptionRow> for Subscription {
    type Error = DomainError;

    fn try_from(row: SubscriptionRow) -> Result<Self, Self::Error> {
        let status = parse_status(&row.status)?;

        Ok(Subscription {
            id: SubscriptionId::from_uuid(row.id),
            identification: row.identification,
            status,
            installments_paid: row.installments_paid,
            total_installments: row.total_installments,
            last_payment_date: row.last_payment_date.map(Timestamp::from_datetime),
            next_payment_date: row.next_payment_date.map(Timestamp::from_datetime),
            initial_transaction_id: row.initial_transaction_id,
            response_data: row.response_data,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn parse_status(s: &str) -> Result<SubscriptionStatus, DomainError> {
    match s.to_lowercase().as_str() {
        "pending_first_payment" => Ok(SubscriptionStatus::PendingFirstPayment),
        "active" => Ok(SubscriptionStatus::Active),
        "past_due" => Ok(SubscriptionStatus::PastDue),
        "completed" => Ok(SubscriptionStatus::Completed),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid status value: {}", s),
        )),
    }
}

fn status_to_string(status: &SubscriptionStatus) -> &'static str {
    match status {
        SubscriptionStatus::PendingFirstPayment => "pending_first_payment",
        SubscriptionStatus::Active => "active",
        SubscriptionStatus::PastDue => "past_due",
        SubscriptionStatus::Completed => "completed",
    }
}

#[async_trait]
impl SubscriptionStore for PostgresSubscriptionStore {
    async fn find_open_by_identification(
        &self,
        identification: &str,
    ) -> Result<Option<Subscription>, DomainError> {
        let row: Option<SubscriptionRow> = sqlx::query_as(
            r#"
            SELECT id, identification, status, installments_paid, total_installments,
                   last_payment_date, next_payment_date, initial_transaction_id,
                   response_data, created_at, updated_at
            FROM subscriptions
            WHERE identification = $1
              AND status IN ('pending_first_payment', 'active', 'past_due')
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(identification)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find subscription: {}", e),
            )
        })?;

        row.map(Subscription::try_from).transpose()
    }

    async fn update(&self, subscription: &Subscription) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE subscriptions SET
                status = $2,
                installments_paid = $3,
                last_payment_date = $4,
                next_payment_date = $5,
                initial_transaction_id = $6,
                response_data = $7,
                updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(subscription.id.as_uuid())
        .bind(status_to_string(&subscription.status))
        .bind(subscription.installments_paid)
        .bind(subscription.last_payment_date.map(|t| *t.as_datetime()))
        .bind(subscription.next_payment_date.map(|t| *t.as_datetime()))
        .bind(&subscription.initial_transaction_id)
        .bind(&subscription.response_data)
        .bind(subscription.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update subscription: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SubscriptionNotFound,
                "Subscription not found",
            ));
        }

        Ok(())
    }
}
