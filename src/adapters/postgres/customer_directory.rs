//! PostgreSQL implementation of CustomerDirectory.
//!
//! Read-only lookup against the customers table maintained by the
//! enrollment flow.

use crate::domain::foundation::{CustomerId, DomainError, ErrorCode};
use crate::ports::CustomerDirectory;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL implementation of the CustomerDirectory port.
pub struct PostgresCustomerDirectory {
    pool: PgPool,
}

impl PostgresCustomerDirectory {
    /// Creates a new PostgresCustomerDirectory with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerDirectory for PostgresCustomerDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<CustomerId>, DomainError> {
        let id: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM customers WHERE email = $1 LIMIT 1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to look up customer by email: {}", e),
                    )
                })?;

        Ok(id.map(CustomerId::from_uuid))
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<CustomerId>, DomainError> {
        let id: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM customers WHERE phone = $1 LIMIT 1")
                .bind(phone)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to look up customer by phone: {}", e),
                    )
                })?;

        Ok(id.map(CustomerId::from_uuid))
    }
}
