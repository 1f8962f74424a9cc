use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::models::users::SessionUser;
use crate::errors::Error;

/// Request to sign in
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SignInRequest {
    /// Email address (case-insensitive)
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Response after successful sign-in
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignInBody {
    pub success: bool,
    pub user: SessionUser,
}

/// Response after sign-out
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignOutBody {
    pub success: bool,
}

/// Request to change the signed-in user's password
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ChangePasswordRequest {
    /// Current password (for verification)
    #[serde(default)]
    pub current: String,
    #[serde(default)]
    pub new_password: String,
    /// Must equal `new_password`
    #[serde(default)]
    pub confirm: String,
}

/// Message-only success body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

fn with_cookie(status: StatusCode, cookie: &str, body: impl IntoResponse) -> Response {
    let value = match HeaderValue::from_str(cookie) {
        Ok(value) => value,
        Err(e) => {
            return Error::Internal {
                operation: format!("build session cookie header: {e}"),
            }
            .into_response();
        }
    };
    let mut headers = HeaderMap::new();
    headers.insert(header::SET_COOKIE, value);
    (status, headers, body).into_response()
}

/// Structured response for successful sign-in
pub struct SignInResponse {
    pub body: SignInBody,
    pub cookie: String,
}

impl IntoResponse for SignInResponse {
    fn into_response(self) -> Response {
        with_cookie(StatusCode::OK, &self.cookie, Json(self.body))
    }
}

/// Structured response for sign-out
pub struct SignOutResponse {
    pub body: SignOutBody,
    pub cookie: String,
}

impl IntoResponse for SignOutResponse {
    fn into_response(self) -> Response {
        with_cookie(StatusCode::OK, &self.cookie, Json(self.body))
    }
}
