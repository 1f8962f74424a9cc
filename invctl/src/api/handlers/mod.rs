//! HTTP request handlers for all API endpoints.
//!
//! Handlers are grouped by resource. Authenticated handlers take a
//! [`SessionUser`](crate::api::models::users::SessionUser) argument, which rejects requests
//! without a valid session cookie with 401. All handlers return
//! [`crate::errors::Error`] on failure, which renders as `{ "error": ... }`.
//!
//! - [`auth`]: sign in, sign out and the current session user
//! - [`catalogue`]: public storefront browsing, product detail and landing summary
//! - [`contact`]: contact form submissions
//! - [`dashboard`]: KPIs and chart series
//! - [`inventory`]: paginated stock search
//! - [`products`]: product list, create and delete
//! - [`settings`]: profile and password
//! - [`static_assets`]: frontend asset serving and SPA routing

pub mod auth;
pub mod catalogue;
pub mod contact;
pub mod dashboard;
pub mod inventory;
pub mod products;
pub mod settings;
pub mod static_assets;
