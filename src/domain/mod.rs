//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `payment` - Gateway callback events, outcomes, and the audit log
//! - `subscription` - Installment plan lifecycle and ledger rules

pub mod foundation;
pub mod payment;
pub mod subscription;
