//! tldrfeed Request/Response Models
//!
//! - User: create request
//! - Feed: create and subscribe requests
//! - Article: create request and response
//!
//! Every request body is checked with [`Validate`] before it reaches the
//! repository.

mod article;
mod feed;
mod user;

pub use article::*;
pub use feed::*;
pub use user::*;

use tldrfeed::DomainError;

/// Field-level checks for decoded request bodies
pub trait Validate {
    fn validate(&self) -> Result<(), DomainError>;
}
