//! Session cookie encoding and decoding.
//!
//! The cookie value is a signed JWT (HS256) whose claims are the [`SessionUser`] plus issue and
//! expiry times. The expiry matches the cookie's Max-Age.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::{api::models::users::SessionUser, config::Config, errors::Error, types::UserId};

/// JWT session claims
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: UserId,   // Subject (user ID)
    pub name: String,  // Display name
    pub email: String, // User email
    pub role: String,  // Role label
    pub exp: i64,      // Expiration time
    pub iat: i64,      // Issued at
}

impl SessionClaims {
    /// Create new session claims for a user
    pub fn new(user: &SessionUser, config: &Config) -> Self {
        let now = Utc::now();
        let exp = now + config.auth.session.timeout;

        Self {
            sub: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        }
    }
}

impl From<SessionClaims> for SessionUser {
    fn from(claims: SessionClaims) -> Self {
        Self {
            id: claims.sub,
            name: claims.name,
            email: claims.email,
            role: claims.role,
        }
    }
}

fn secret_key(config: &Config) -> Result<&[u8], Error> {
    config
        .secret_key
        .as_deref()
        .map(str::as_bytes)
        .ok_or_else(|| Error::Internal {
            operation: "sign sessions: secret_key is required".to_string(),
        })
}

/// Encode a session user into a cookie value
pub fn encode_session(user: &SessionUser, config: &Config) -> Result<String, Error> {
    let claims = SessionClaims::new(user, config);
    let key = EncodingKey::from_secret(secret_key(config)?);
    encode(&Header::default(), &claims, &key).map_err(|e| Error::Internal {
        operation: format!("create session token: {e}"),
    })
}

/// Verify and decode a session cookie value
pub fn verify_session_token(token: &str, config: &Config) -> Result<SessionUser, Error> {
    let key = DecodingKey::from_secret(secret_key(config)?);
    let validation = Validation::default();

    let token_data = decode::<SessionClaims>(token, &key, &validation).map_err(|e| match e.kind() {
        // Client errors (401) - malformed tokens, invalid claims, expired tokens
        jsonwebtoken::errors::ErrorKind::InvalidToken
        | jsonwebtoken::errors::ErrorKind::InvalidSignature
        | jsonwebtoken::errors::ErrorKind::ExpiredSignature
        | jsonwebtoken::errors::ErrorKind::MissingRequiredClaim(_)
        | jsonwebtoken::errors::ErrorKind::InvalidSubject
        | jsonwebtoken::errors::ErrorKind::ImmatureSignature
        | jsonwebtoken::errors::ErrorKind::Base64(_)
        | jsonwebtoken::errors::ErrorKind::Json(_)
        | jsonwebtoken::errors::ErrorKind::Utf8(_)
        | jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => Error::Unauthenticated { message: None },

        // Server errors (500) - key issues, internal failures
        _ => Error::Internal {
            operation: format!("verify session token: {e}"),
        },
    })?;

    Ok(SessionUser::from(token_data.claims))
}

/// Decode a cookie value into a session user.
///
/// Malformed, tampered or expired values yield `None`.
pub fn decode_session(value: &str, config: &Config) -> Option<SessionUser> {
    match verify_session_token(value, config) {
        Ok(user) => Some(user),
        Err(Error::Unauthenticated { .. }) => {
            trace!("Rejected session cookie");
            None
        }
        Err(e) => {
            warn!("Session verification failed: {e}");
            None
        }
    }
}

/// `Set-Cookie` value carrying a fresh session token
pub fn session_cookie(token: &str, config: &Config) -> String {
    let session_config = &config.auth.session;
    let max_age = session_config.timeout.as_secs();

    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite={}; Max-Age={}",
        session_config.cookie_name,
        token,
        same_site_label(&session_config.cookie_same_site),
        max_age
    );
    if session_config.cookie_secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that clears the session
pub fn cleared_session_cookie(config: &Config) -> String {
    let session_config = &config.auth.session;
    let mut cookie = format!(
        "{}=; Path=/; HttpOnly; SameSite={}; Max-Age=0",
        session_config.cookie_name,
        same_site_label(&session_config.cookie_same_site)
    );
    if session_config.cookie_secure {
        cookie.push_str("; Secure");
    }
    cookie
}

fn same_site_label(value: &str) -> &'static str {
    match value.to_lowercase().as_str() {
        "strict" => "Strict",
        "none" => "None",
        _ => "Lax",
    }
}
