//! API request/response models for users and profiles.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::types::UserId;

/// The signed-in user, as carried in the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SessionUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: String,
}

/// Profile of the signed-in user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Read-only
    pub role: String,
}

/// Editable profile fields. Omitted fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}
