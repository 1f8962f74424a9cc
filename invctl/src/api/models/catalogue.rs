//! Public catalogue models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::models::products::ProductResponse;

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct CatalogueQuery {
    /// Matches name, description or SKU (case-insensitive)
    pub q: Option<String>,
    /// Exact category name
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CatalogueResponse {
    pub products: Vec<ProductResponse>,
    /// Every category in the store, sorted by name, with unfiltered counts
    pub categories: Vec<CategoryCount>,
    /// Number of products before filtering
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductDetailResponse {
    pub product: ProductResponse,
    pub is_low_stock: bool,
    /// Up to three other products from the same category
    pub related: Vec<ProductResponse>,
}

/// Numbers for the landing page
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CatalogueSummary {
    pub total_products: usize,
    pub categories: usize,
    pub low_stock: usize,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total_stock_value: Decimal,
    /// First six products, newest first
    pub featured: Vec<ProductResponse>,
}
