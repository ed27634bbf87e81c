//! Domain Entities
//!
//! Passive records owned by the repository.
//! - User: a subscriber
//! - Feed: a named channel of articles
//! - Article: a post in a feed

mod article;
mod feed;
mod user;

pub use article::*;
pub use feed::*;
pub use user::*;

use uuid::Uuid;

/// Generate a fresh entity ID.
///
/// UUIDv7 keeps IDs unique and sortable by creation time.
pub fn new_id() -> String {
    Uuid::now_v7().to_string()
}
