//! Article - a post published to a feed

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::new_id;

/// Article - immutable post belonging to exactly one Feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub body: String,
    pub published_at: DateTime<Utc>,
}

impl Article {
    /// Create a new Article published now.
    ///
    /// The timestamp is truncated to milliseconds, the resolution the
    /// document store keeps, so both backends report identical values.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            title: title.into(),
            body: body.into(),
            published_at: Utc::now().trunc_subsecs(3),
        }
    }
}

/// Sort articles most recent first.
///
/// Ties on `published_at` fall back to the ID, which is time-ordered.
pub fn sort_newest_first(articles: &mut [Article]) {
    articles.sort_by(|a, b| {
        b.published_at
            .cmp(&a.published_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}
