//! Authentication.
//!
//! Users sign in with email and password against a small directory loaded from `auth.users`.
//! A successful sign-in sets an HTTP-only cookie holding a signed session token; there is no
//! server-side session table, so signing out just clears the cookie.
//!
//! # Modules
//!
//! - [`current_user`]: Extractor for getting the signed-in user in handlers
//! - [`middleware`]: Redirects for protected pages and the sign-in page
//! - [`password`]: Password hashing and verification using Argon2
//! - [`session`]: Session token encoding/decoding and cookie formatting
//! - [`users`]: The in-memory user directory
//!
//! # Usage in Handlers
//!
//! ```ignore
//! use invctl::api::models::users::SessionUser;
//!
//! async fn protected_handler(current_user: SessionUser) -> String {
//!     format!("Hello, {}!", current_user.name)
//! }
//! ```

pub mod current_user;
pub mod middleware;
pub mod password;
pub mod session;
pub mod users;
