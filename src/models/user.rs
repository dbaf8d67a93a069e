//! User (holder) model and related types

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Member,
}

/// User record as persisted. The password hash never leaves the identity
/// store; API responses use [`UserProfile`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// User profile returned by the API (no credentials)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserProfile {
    pub username: String,
    pub role: Role,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            role: user.role,
            email: user.email.clone(),
            phone: user.phone.clone(),
        }
    }
}

/// Registration request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub role: Option<Role>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Login request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Password change request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ChangePasswordRequest {
    pub username: String,
    pub old_password: String,
    pub new_password: String,
}

/// Contact information update request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateContactRequest {
    pub username: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}
