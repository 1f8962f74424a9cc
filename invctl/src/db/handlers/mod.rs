//! Repository implementations.
//!
//! Repositories are created per request from a locked [`ProductFile`] and drop the lock when
//! they go out of scope:
//!
//! ```ignore
//! let mut file = state.products.lock().await;
//! let mut repo = Products::new(&mut file);
//! let product = repo.create(&request).await?;
//! ```

pub mod products;
pub mod repository;

pub use products::{ProductFile, ProductFilter, ProductSearch, ProductStore, Products};
pub use repository::Repository;
