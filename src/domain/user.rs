//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User domain entity.
///
/// The numeric `id` is assigned from a named sequence at creation time and
/// is immutable afterwards; it is distinct from the storage-internal record
/// key, which never leaves the infrastructure layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User creation data transfer object
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateUser {
    /// User email address
    #[schema(example = "user@example.com")]
    pub email: String,
    /// User password (hashed before persisting, never stored in plain text)
    #[schema(example = "SecurePass123!")]
    pub password: String,
    /// Given name
    #[schema(example = "John")]
    pub first_name: String,
    /// Family name (optional)
    #[schema(example = "Doe")]
    pub last_name: Option<String>,
}

/// Partial user update; unset fields are left unchanged.
/// The password is not updatable through this path.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateUser {
    /// New email address
    #[schema(example = "user@example.com")]
    pub email: Option<String>,
    /// New given name
    #[schema(example = "Jane")]
    pub first_name: Option<String>,
    /// New family name
    #[schema(example = "Doe")]
    pub last_name: Option<String>,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    /// Sequence-assigned user identifier
    #[schema(example = 1)]
    pub id: i64,
    /// User email address
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Given name
    #[schema(example = "John")]
    pub first_name: String,
    /// Family name, omitted when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Doe")]
    pub last_name: Option<String>,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            created_at: user.created_at,
        }
    }
}
