//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: Axum route handlers for all API endpoints
//! - **[`models`]**: Request/response data structures
//! - **[`json`]**: JSON body extractor with API-shaped rejections
//!
//! # API Structure
//!
//! Everything is mounted under `/api`:
//!
//! - **Auth** (`/api/auth/*`): sign in, sign out, current user
//! - **Products** (`/api/products`): list, add, delete
//! - **Inventory** (`/api/inventory`): paginated search over stock
//! - **Catalogue** (`/api/catalogue/*`): public storefront
//! - **Dashboard** (`/api/dashboard`): KPIs and chart series
//! - **Settings** (`/api/settings/*`): profile and password
//! - **Contact** (`/api/contact`): contact form
//!
//! OpenAPI documentation is served at `/api/docs`.

pub mod handlers;
pub mod json;
pub mod models;
