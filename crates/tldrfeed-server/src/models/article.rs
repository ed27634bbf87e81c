//! Article request/response models

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use tldrfeed::domain::validation::require_non_empty;
use tldrfeed::DomainError;

use super::Validate;

/// Add an Article to a Feed
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateArticleRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

impl Validate for CreateArticleRequest {
    fn validate(&self) -> Result<(), DomainError> {
        require_non_empty("Article title", &self.title)?;
        require_non_empty("Article body", &self.body)
    }
}

/// ID of a newly created Article
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateArticleResponse {
    pub id: String,
}
