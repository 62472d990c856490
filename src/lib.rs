//! Payment Webhook Service
//!
//! Receives payment-status callbacks from the payments gateway, records an
//! append-only transaction log, resolves payers to customers and advances
//! the recurring-subscription installment ledger.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
