//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - Axum REST surface for the gateway callbacks
//! - `postgres` - sqlx-backed storage adapters
//! - `email` - Resend transactional email adapter

pub mod email;
pub mod http;
pub mod postgres;
