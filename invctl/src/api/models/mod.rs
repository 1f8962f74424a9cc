//! API request and response data models.
//!
//! These types are the public JSON contract and are kept apart from the storage
//! models in [`crate::db::models`], so the on-disk format can change independently.
//! Everything here derives `utoipa::ToSchema` for the generated API docs.

pub mod auth;
pub mod catalogue;
pub mod contact;
pub mod dashboard;
pub mod pagination;
pub mod products;
pub mod users;
