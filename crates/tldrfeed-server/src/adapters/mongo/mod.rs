//! MongoDB Repository Implementation

mod documents;
mod repository;

pub use repository::{MongoConfig, MongoRepository};
