//! Repository Ports
//!
//! Abstract interfaces for data persistence operations.

mod feed_repository;

pub use feed_repository::*;
