use crate::{AppState, auth::current_user::try_session_auth};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

/// Page paths that need a signed-in user. Sub-paths are covered too.
pub const PROTECTED_PAGES: &[&str] = &["/dashboard", "/inventory", "/add-product", "/settings"];

pub const SIGNIN_PAGE: &str = "/signin";
pub const HOME_PAGE: &str = "/dashboard";

fn is_protected(path: &str) -> bool {
    PROTECTED_PAGES
        .iter()
        .any(|prefix| path == *prefix || path.strip_prefix(prefix).is_some_and(|rest| rest.starts_with('/')))
}

fn signin_redirect(path: &str) -> String {
    let from: String = url::form_urlencoded::byte_serialize(path.as_bytes()).collect();
    format!("{SIGNIN_PAGE}?from={from}")
}

/// Redirects page navigations based on the session cookie.
///
/// Protected pages without a valid session go to `/signin?from=<path>`; `/signin` with a valid
/// session goes to `/dashboard`. API routes are untouched and do their own 401 handling.
pub async fn page_guard_middleware(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();

    let protected = is_protected(&path);
    let signin = path == SIGNIN_PAGE;
    if !protected && !signin {
        return next.run(request).await;
    }

    let (parts, body) = request.into_parts();
    let signed_in = try_session_auth(&parts, &state.config).is_some_and(|user| state.users.contains(&user.id));
    let request = Request::from_parts(parts, body);

    match (protected, signed_in) {
        (true, false) => {
            debug!("Redirecting anonymous request for {} to sign in", path);
            Redirect::to(&signin_redirect(&path)).into_response()
        }
        (false, true) => {
            debug!("Already signed in, redirecting {} to {}", path, HOME_PAGE);
            Redirect::to(HOME_PAGE).into_response()
        }
        _ => next.run(request).await,
    }
}
