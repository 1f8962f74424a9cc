//! Storage layer for data persistence and access.
//!
//! Products are kept as a pretty-printed JSON array in a single file (`data.products_file`).
//! Access follows the Repository pattern so handlers never touch the file directly.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  (API request handlers)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │ Repositories│  (db::handlers - filtering, paging, mutations)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │   Models    │  (db::models - stored records)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │  JSON file  │
//! └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`handlers`]: Repository implementations
//! - [`models`]: Stored record structures
//! - [`errors`]: Storage-specific error types
//!
//! ## Example Usage
//!
//! Repositories borrow the file from a held lock, the same way a SQL repository would borrow a
//! transaction. Keep the guard for the whole read-modify-write:
//!
//! ```ignore
//! use invctl::db::handlers::{ProductFilter, Products, Repository};
//!
//! let mut file = state.products.lock().await;
//! let mut repo = Products::new(&mut file);
//!
//! let product = repo.create(&request).await?;
//! let first_page = repo.list(&ProductFilter::new(0, 5)).await?;
//! ```

pub mod errors;
pub mod handlers;
pub mod models;
