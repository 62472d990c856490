//! PostgreSQL implementation of PaymentLogStore.
//!
//! Append-only writer for the payment audit log.

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::payment::PaymentLogEntry;
use crate::ports::PaymentLogStore;
use async_trait::async_trait;
use sqlx::PgPool;

/// PostgreSQL implementation of the PaymentLogStore port.
pub struct PostgresPaymentLogStore {
    pool: PgPool,
}

impl PostgresPaymentLogStore {
    /// Creates a new PostgresPaymentLogStore with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentLogStore for PostgresPaymentLogStore {
    async fn append(&self, entry: &PaymentLogEntry) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO payment_logs (
                id, order_id, transaction_id, amount, status_id, status_name,
                payer_email, payer_phone, payer_name, payer_identification,
                payment_method, raw_response, customer_id, received_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(entry.id.as_uuid())
        .bind(&entry.order_id)
        .bind(&entry.transaction_id)
        .bind(entry.amount)
        .bind(entry.status_id)
        .bind(&entry.status_name)
        .bind(&entry.payer_email)
        .bind(&entry.payer_phone)
        .bind(&entry.payer_name)
        .bind(&entry.payer_identification)
        .bind(&entry.payment_method)
        .bind(&entry.raw_response)
        .bind(entry.customer_id.map(|id| *id.as_uuid()))
        .bind(entry.received_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to append payment log: {}", e),
            )
        })?;

        Ok(())
    }
}
