//! User - a subscriber of feeds

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::new_id;

/// User - a subscriber who follows feeds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: String,
    pub name: String,
}

impl User {
    /// Create a new User with a generated ID
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
        }
    }
}
