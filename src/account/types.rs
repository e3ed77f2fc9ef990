//! Account request and response bodies.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::store::Role;

/// Signup body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignupRequest {
    /// Unique within the role's collection only.
    pub email: String,
    /// Stored as given.
    pub password: String,
    /// Display name.
    pub full_name: String,
    /// Selects the collection the account lands in.
    pub role: Role,
}

/// Login body.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// Partial profile update. Only present, non-null fields are written.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ProfileUpdate {
    /// New display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// New email. Not re-checked for uniqueness.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Contact phone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Postal address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Signup success body.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SignupResponse {
    /// Always "Signup successful".
    pub message: String,
    /// Role the account was created under.
    pub role: Role,
    /// Generated identifier.
    pub user_id: String,
    /// Echoed email.
    pub email: String,
    /// Echoed display name.
    pub full_name: String,
}

/// Login success body.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Always "Login successful".
    pub message: String,
    /// Role inferred from the matching collection.
    pub role: Role,
    /// Stored display name, if any.
    pub full_name: Option<String>,
    /// Stored email, if any.
    pub email: Option<String>,
    /// Account identifier.
    pub user_id: String,
    /// Same as `user_id`.
    #[serde(rename = "_id")]
    pub id: String,
}
