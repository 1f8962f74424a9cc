//! Dashboard analytics models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::models::products::ProductResponse;
use crate::types::ProductId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MonthlyRevenue {
    pub month: String,
    pub revenue: u64,
    pub orders: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MonthlyStock {
    pub month: String,
    pub added: u32,
    pub sold: u32,
    pub current: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryShare {
    pub name: String,
    /// Percentage of sales
    pub value: u32,
    /// Chart colour as `#rrggbb`
    pub color: String,
}

/// Headline numbers
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardKpis {
    pub total_products: usize,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total_stock_value: Decimal,
    pub total_categories: usize,
    pub low_stock_count: usize,
    pub current_revenue: u64,
    /// Month-over-month revenue change in percent, one decimal place
    pub revenue_growth: f64,
    pub current_orders: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LowStockAlert {
    #[schema(value_type = String, format = "uuid")]
    pub id: ProductId,
    pub name: String,
    pub sku: String,
    pub quantity: u32,
    pub low_stock_at: u32,
    /// quantity / threshold as a percentage, capped at 100
    pub fill_percent: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TopProduct {
    #[schema(value_type = String, format = "uuid")]
    pub id: ProductId,
    pub name: String,
    pub sku: String,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub stock_value: Decimal,
    /// Stock value relative to the top entry, as a percentage
    pub share_percent: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardResponse {
    pub kpis: DashboardKpis,
    pub low_stock_alerts: Vec<LowStockAlert>,
    pub top_products: Vec<TopProduct>,
    pub recent_products: Vec<ProductResponse>,
    pub monthly_revenue: Vec<MonthlyRevenue>,
    pub monthly_stock: Vec<MonthlyStock>,
    pub category_breakdown: Vec<CategoryShare>,
}
