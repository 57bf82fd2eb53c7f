use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body the question service attaches to non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("country name must not be empty")]
    EmptyCountry,
    #[error("question response has neither game_over nor country")]
    MissingCountry,
    #[error("game over response is missing its message")]
    MissingMessage,
}
