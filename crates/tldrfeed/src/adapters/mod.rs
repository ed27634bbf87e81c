//! Storage Adapters
//!
//! Storage backends that need nothing beyond the standard library.

pub mod memory;

// Re-exports
pub use memory::InMemoryRepository;
