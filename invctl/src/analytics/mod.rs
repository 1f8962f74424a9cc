//! Dashboard analytics.
//!
//! - [`seed`]: sample monthly revenue, stock movement and category share series
//! - [`kpis`]: stock value, low-stock alerts and rankings computed from stored products

pub mod kpis;
pub mod seed;
