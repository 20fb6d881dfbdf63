use serde::Serialize;
use utoipa::ToSchema;

/// Message-only response, used where an outcome is reported in the body
/// rather than through the status code
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable outcome description
    #[schema(example = "Successfully deleted user by ID: 1")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
