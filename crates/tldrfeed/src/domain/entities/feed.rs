//! Feed - a named channel that publishes articles

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::new_id;

/// Feed - a named channel users can subscribe to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Feed {
    pub id: String,
    pub name: String,
}

impl Feed {
    /// Create a new Feed with a generated ID
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
        }
    }
}
