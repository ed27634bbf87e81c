//! Infrastructure Adapters
//!
//! Implementations of domain ports for external systems.

pub mod mongo;

// Re-exports
pub use mongo::{MongoConfig, MongoRepository};
