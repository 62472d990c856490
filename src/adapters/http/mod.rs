//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure.

pub mod payments;

// Re-export key types for convenience
pub use payments::app_router;
pub use payments::PaymentsAppState;
