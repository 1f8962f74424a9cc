//! Account settings for the signed-in user: profile and password.

use axum::{Json, extract::State};
use tracing::info;

use crate::{
    AppState,
    api::json::AppJson,
    api::models::{
        auth::{ChangePasswordRequest, MessageResponse},
        contact::is_valid_email,
        users::{ProfileResponse, ProfileUpdate, SessionUser},
    },
    auth::password::{self, Argon2Params},
    errors::{Error, Result},
};

fn user_not_found(id: &str) -> Error {
    Error::NotFound {
        resource: "User".to_string(),
        id: id.to_string(),
    }
}

/// Get the signed-in user's profile
#[utoipa::path(
    get,
    path = "/settings/profile",
    tag = "settings",
    responses(
        (status = 200, description = "Profile", body = ProfileResponse),
        (status = 401, description = "Not signed in"),
    ),
    security(("SessionCookie" = []))
)]
#[tracing::instrument(skip_all, fields(user_id = %current_user.id))]
pub async fn get_profile(State(state): State<AppState>, current_user: SessionUser) -> Result<Json<ProfileResponse>> {
    let user = state.users.get(&current_user.id).ok_or_else(|| user_not_found(&current_user.id))?;
    Ok(Json(ProfileResponse::from(user)))
}

/// Update name, email or phone. Role can't be changed here.
#[utoipa::path(
    patch,
    path = "/settings/profile",
    request_body = ProfileUpdate,
    tag = "settings",
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 400, description = "Invalid name or email"),
        (status = 401, description = "Not signed in"),
    ),
    security(("SessionCookie" = []))
)]
#[tracing::instrument(skip_all, fields(user_id = %current_user.id))]
pub async fn update_profile(
    State(state): State<AppState>,
    current_user: SessionUser,
    AppJson(update): AppJson<ProfileUpdate>,
) -> Result<Json<ProfileResponse>> {
    let name = update.name.map(|n| n.trim().to_string());
    if name.as_deref().is_some_and(str::is_empty) {
        return Err(Error::BadRequest {
            message: "Name is required.".to_string(),
        });
    }
    let email = update.email.map(|e| e.trim().to_string());
    if email.as_deref().is_some_and(|e| !is_valid_email(e)) {
        return Err(Error::BadRequest {
            message: "Enter a valid email address.".to_string(),
        });
    }
    let phone = update.phone.map(|p| p.trim().to_string());

    let user = state
        .users
        .update_profile(&current_user.id, ProfileUpdate { name, email, phone })?;

    info!("Profile updated");
    Ok(Json(ProfileResponse::from(user)))
}

/// Change the signed-in user's password
#[utoipa::path(
    post,
    path = "/settings/password",
    request_body = ChangePasswordRequest,
    tag = "settings",
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 400, description = "New password too short or confirmation mismatch"),
        (status = 401, description = "Not signed in or current password wrong"),
    ),
    security(("SessionCookie" = []))
)]
#[tracing::instrument(skip_all, fields(user_id = %current_user.id))]
pub async fn change_password(
    State(state): State<AppState>,
    current_user: SessionUser,
    AppJson(request): AppJson<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>> {
    let password_config = &state.config.auth.password;
    password::validate_new_password(&request.new_password, password_config)?;
    if request.new_password != request.confirm {
        return Err(Error::BadRequest {
            message: "Passwords do not match.".to_string(),
        });
    }

    if !state.users.verify_password(&current_user.id, &request.current).await? {
        return Err(Error::Unauthenticated {
            message: Some("Current password is incorrect.".to_string()),
        });
    }

    // Hash the password on a blocking thread to avoid blocking async runtime
    let params = Argon2Params::from(password_config);
    let new_password = request.new_password;
    let password_hash = tokio::task::spawn_blocking(move || password::hash_string_with_params(&new_password, Some(params)))
        .await
        .map_err(|e| Error::Internal {
            operation: format!("spawn password hashing task: {e}"),
        })??;
    state.users.set_password_hash(&current_user.id, password_hash)?;

    info!("Password changed");
    Ok(Json(MessageResponse {
        message: "Password updated.".to_string(),
    }))
}
