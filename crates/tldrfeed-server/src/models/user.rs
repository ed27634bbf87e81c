//! User request models

use serde::Deserialize;
use utoipa::ToSchema;

use tldrfeed::domain::validation::require_non_empty;
use tldrfeed::DomainError;

use super::Validate;

/// Create User request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: String,
}

impl Validate for CreateUserRequest {
    fn validate(&self) -> Result<(), DomainError> {
        require_non_empty("User name", &self.name)?;
        if !self.name.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(DomainError::Validation(
                "User name should be alphanumeric".to_string(),
            ));
        }
        Ok(())
    }
}
