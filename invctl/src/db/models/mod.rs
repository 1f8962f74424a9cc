//! Storage record models.
//!
//! These are distinct from the API models in [`crate::api::models`] so the
//! on-disk and wire representations can evolve independently. Conversions to
//! API models are `From` impls on the API side.
//!
//! - [`products`]: Product create requests and stored product records

pub mod products;
