//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the domain layer
//! interacts with storage.
//!
//! The in-memory implementation lives in `adapters`; the document store
//! implementation lives in the server crate.

pub mod repositories;

// Re-exports
pub use repositories::*;
