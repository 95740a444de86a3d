use thiserror::Error;
use uuid::Uuid;

/// Domain outcomes the API layer maps to distinct status codes.
#[derive(Debug, Error)]
pub enum SubscriptionError {
    #[error("subscription {0} not found")]
    NotFound(Uuid),

    #[error("{0}")]
    InvalidInput(String),
}
