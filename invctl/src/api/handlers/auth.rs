use axum::{Json, extract::State};
use tracing::info;

use crate::{
    AppState,
    api::json::AppJson,
    api::models::{
        auth::{SignInBody, SignInRequest, SignInResponse, SignOutBody, SignOutResponse},
        users::SessionUser,
    },
    auth::session,
    errors::Error,
};

const INVALID_CREDENTIALS: &str = "Invalid email or password.";

/// Sign in with email and password
#[utoipa::path(
    post,
    path = "/auth/signin",
    request_body = SignInRequest,
    tag = "authentication",
    responses(
        (status = 200, description = "Signed in; session cookie set", body = SignInBody),
        (status = 401, description = "Invalid credentials"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn sign_in(State(state): State<AppState>, AppJson(request): AppJson<SignInRequest>) -> Result<SignInResponse, Error> {
    let user = state
        .users
        .verify_credentials(&request.email, &request.password)
        .await?
        .ok_or_else(|| Error::Unauthenticated {
            message: Some(INVALID_CREDENTIALS.to_string()),
        })?;

    let token = session::encode_session(&user, &state.config)?;
    let cookie = session::session_cookie(&token, &state.config);

    info!("User {} signed in", user.id);
    Ok(SignInResponse {
        body: SignInBody { success: true, user },
        cookie,
    })
}

/// Sign out (clear the session cookie)
#[utoipa::path(
    post,
    path = "/auth/signout",
    tag = "authentication",
    responses(
        (status = 200, description = "Signed out", body = SignOutBody),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn sign_out(State(state): State<AppState>) -> Result<SignOutResponse, Error> {
    Ok(SignOutResponse {
        body: SignOutBody { success: true },
        cookie: session::cleared_session_cookie(&state.config),
    })
}

/// The signed-in user
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "authentication",
    responses(
        (status = 200, description = "Current session user", body = SessionUser),
        (status = 401, description = "Not signed in"),
    ),
    security(("SessionCookie" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn get_current_user(current_user: SessionUser) -> Json<SessionUser> {
    Json(current_user)
}
