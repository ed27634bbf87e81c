//! tldrfeed Domain Library
//!
//! Core domain types and the repository contract for the tldrfeed news feed
//! subscription service.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain/`): Pure business entities
//!   - `entities/`: User, Feed, Article
//!   - `validation`: input checks shared by all backends
//!   - `errors`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Data access interface (`FeedRepository`)
//!
//! - **Adapters** (`adapters/`): `InMemoryRepository`, the reference backend
//!
//! # Usage
//!
//! ```rust,ignore
//! use tldrfeed::{FeedRepository, InMemoryRepository};
//!
//! let repo = InMemoryRepository::new();
//! let user = repo.create_user("alexandra").await?;
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-export commonly used types
pub use adapters::InMemoryRepository;
pub use domain::{sort_newest_first, Article, DomainError, Feed, User};
pub use ports::FeedRepository;
