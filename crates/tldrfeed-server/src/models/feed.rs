//! Feed request models

use serde::Deserialize;
use utoipa::ToSchema;

use tldrfeed::domain::validation::require_non_empty;
use tldrfeed::DomainError;

use super::Validate;

/// Create Feed request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateFeedRequest {
    #[serde(default)]
    pub name: String,
}

impl Validate for CreateFeedRequest {
    fn validate(&self) -> Result<(), DomainError> {
        require_non_empty("Feed name", &self.name)
    }
}

/// Subscribe a User to an existing Feed
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddUserFeedRequest {
    #[serde(default)]
    pub feed_id: String,
}

impl Validate for AddUserFeedRequest {
    fn validate(&self) -> Result<(), DomainError> {
        require_non_empty("Feed ID", &self.feed_id)
    }
}
