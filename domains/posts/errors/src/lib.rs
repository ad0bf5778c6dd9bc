use category_errors::CategoryError;
use post_models::InvalidPostStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PostError {
    #[error("Primary store error: {0}")]
    Store(#[from] mongodb::error::Error),
    #[error("Invalid object id: {0}")]
    InvalidId(#[from] mongodb::bson::oid::Error),
    #[error("Document encode error: {0}")]
    Encode(#[from] mongodb::bson::ser::Error),
    #[error(transparent)]
    InvalidStatus(#[from] InvalidPostStatus),
    #[error("Post not found: {slug}")]
    NotFound { slug: String },
    #[error("Post not found: {id}")]
    NotFoundById { id: mongodb::bson::oid::ObjectId },
    #[error("Category error: {0}")]
    Category(#[from] CategoryError),
    #[error("Redis error: {0}")]
    Redis(#[from] redis_connection::RedisError),
    #[error("Redis pool error: {0}")]
    Pool(#[from] redis_connection::PoolError),
}
