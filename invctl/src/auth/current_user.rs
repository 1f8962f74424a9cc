use crate::{
    AppState,
    api::models::users::SessionUser,
    auth::session,
    config::Config,
    errors::{Error, Result},
};
use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::{debug, instrument, trace};

/// Find the session cookie value in the request, if any.
pub(crate) fn session_cookie_value<'a>(parts: &'a Parts, config: &Config) -> Option<&'a str> {
    let cookie_str = parts.headers.get(axum::http::header::COOKIE)?.to_str().ok()?;
    let cookie_name = &config.auth.session.cookie_name;

    cookie_str
        .split(';')
        .filter_map(|cookie| cookie.trim().split_once('='))
        .find(|(name, value)| *name == cookie_name.as_str() && !value.is_empty())
        .map(|(_, value)| value)
}

/// Extract user from the session cookie if present and valid
#[instrument(skip(parts, config))]
pub(crate) fn try_session_auth(parts: &Parts, config: &Config) -> Option<SessionUser> {
    let value = session_cookie_value(parts, config)?;
    session::decode_session(value, config)
}

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = Error;

    #[instrument(skip(parts, state))]
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let Some(user) = try_session_auth(parts, &state.config) else {
            trace!("No valid session cookie");
            return Err(Error::Unauthenticated { message: None });
        };

        // The cookie only pins the id; name and email come from the directory so profile
        // edits apply immediately. Removed users lose access even with an unexpired cookie.
        let Some(record) = state.users.get(&user.id) else {
            debug!("Session refers to unknown user {}", user.id);
            return Err(Error::Unauthenticated { message: None });
        };

        debug!("Found session authenticated user: {}", user.id);
        Ok(record.session_user())
    }
}
