//! Figures derived from the live product list.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use std::collections::BTreeMap;

use crate::analytics::seed;
use crate::api::models::{
    catalogue::CategoryCount,
    dashboard::{DashboardKpis, DashboardResponse, LowStockAlert, MonthlyRevenue, TopProduct},
    products::ProductResponse,
};
use crate::db::models::products::ProductDBResponse;

pub const TOP_PRODUCTS: usize = 5;
pub const RECENT_PRODUCTS: usize = 6;

/// Saturates at `Decimal::MAX`.
pub fn total_stock_value(products: &[ProductDBResponse]) -> Decimal {
    products
        .iter()
        .map(ProductDBResponse::stock_value)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Distinct categories, sorted by name, with how many products each holds
pub fn category_counts(products: &[ProductDBResponse]) -> Vec<CategoryCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for product in products {
        *counts.entry(product.category.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(name, count)| CategoryCount {
            name: name.to_string(),
            count,
        })
        .collect()
}

pub fn low_stock_count(products: &[ProductDBResponse]) -> usize {
    products.iter().filter(|p| p.is_low_stock()).count()
}

pub fn low_stock_alerts(products: &[ProductDBResponse]) -> Vec<LowStockAlert> {
    products
        .iter()
        .filter(|p| p.is_low_stock())
        .map(|p| LowStockAlert {
            id: p.id,
            name: p.name.clone(),
            sku: p.sku.clone(),
            quantity: p.quantity,
            low_stock_at: p.low_stock_at,
            fill_percent: percent(u64::from(p.quantity), u64::from(p.low_stock_at)).min(100),
        })
        .collect()
}

/// Highest stock value first; ties keep store order
pub fn top_products(products: &[ProductDBResponse], limit: usize) -> Vec<TopProduct> {
    let mut ranked: Vec<(&ProductDBResponse, Decimal)> = products.iter().map(|p| (p, p.stock_value())).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(limit);

    let max = ranked.first().map(|(_, value)| *value).unwrap_or_default();
    ranked
        .into_iter()
        .map(|(p, value)| TopProduct {
            id: p.id,
            name: p.name.clone(),
            sku: p.sku.clone(),
            quantity: p.quantity,
            stock_value: value,
            share_percent: if max.is_zero() {
                0
            } else {
                (value / max * Decimal::ONE_HUNDRED).round().to_u32().unwrap_or(0)
            },
        })
        .collect()
}

/// Last month against the one before, in percent to one decimal place
pub fn revenue_growth(series: &[MonthlyRevenue]) -> f64 {
    let [.., prev, current] = series else {
        return 0.0;
    };
    if prev.revenue == 0 {
        return 0.0;
    }
    let growth = (current.revenue as f64 - prev.revenue as f64) / prev.revenue as f64 * 100.0;
    (growth * 10.0).round() / 10.0
}

fn percent(part: u64, whole: u64) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}

/// Assemble the dashboard from the current products (newest first) and the seeded history.
pub fn build_dashboard(products: Vec<ProductDBResponse>) -> DashboardResponse {
    let monthly_revenue = seed::monthly_revenue();
    let (current_revenue, current_orders) = monthly_revenue
        .last()
        .map(|m| (m.revenue, m.orders))
        .unwrap_or_default();

    let kpis = DashboardKpis {
        total_products: products.len(),
        total_stock_value: total_stock_value(&products),
        total_categories: category_counts(&products).len(),
        low_stock_count: low_stock_count(&products),
        current_revenue,
        revenue_growth: revenue_growth(&monthly_revenue),
        current_orders,
    };

    DashboardResponse {
        kpis,
        low_stock_alerts: low_stock_alerts(&products),
        top_products: top_products(&products, TOP_PRODUCTS),
        recent_products: products.into_iter().take(RECENT_PRODUCTS).map(ProductResponse::from).collect(),
        monthly_revenue,
        monthly_stock: seed::monthly_stock(),
        category_breakdown: seed::category_breakdown(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn product(name: &str, category: &str, price: i64, quantity: u32, low_stock_at: u32) -> ProductDBResponse {
        ProductDBResponse {
            id: Uuid::new_v4(),
            name: name.to_string(),
            sku: format!("SKU-{name}"),
            price: Decimal::new(price, 0),
            quantity,
            low_stock_at,
            category: category.to_string(),
            description: String::new(),
            image: None,
            created_at: Utc::now(),
        }
    }

    fn sample() -> Vec<ProductDBResponse> {
        vec![
            product("Headphones", "Electronics", 200, 42, 10),
            product("Yoga Mat", "Sports", 60, 7, 10),
            product("Jacket", "Clothing", 270, 16, 20),
            product("Novel", "Books", 15, 0, 0),
        ]
    }

    #[test]
    fn test_revenue_growth_from_seed() {
        // (31800 - 29100) / 29100 = 9.278%
        assert_eq!(revenue_growth(&seed::monthly_revenue()), 9.3);
        assert_eq!(revenue_growth(&[]), 0.0);
    }

    #[test]
    fn test_low_stock_alerts() {
        let alerts = low_stock_alerts(&sample());
        let names: Vec<_> = alerts.iter().map(|a| a.name.as_str()).collect();
        // Novel has quantity 0 but threshold 0, so no alert
        assert_eq!(names, vec!["Yoga Mat", "Jacket"]);
        assert_eq!(alerts[0].fill_percent, 70);
        assert_eq!(alerts[1].fill_percent, 80);
    }

    #[test]
    fn test_fill_percent_is_capped() {
        assert_eq!(percent(15, 10).min(100), 100);
        assert_eq!(percent(1, 3), 33);
    }

    #[test]
    fn test_top_products_ranked_by_stock_value() {
        let top = top_products(&sample(), 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].name, "Headphones"); // 8400
        assert_eq!(top[0].share_percent, 100);
        assert_eq!(top[1].name, "Jacket"); // 4320
        assert_eq!(top[1].share_percent, 51);
    }

    #[test]
    fn test_category_counts_sorted() {
        let mut products = sample();
        products.push(product("Speaker", "Electronics", 80, 3, 0));
        let counts = category_counts(&products);
        let names: Vec<_> = counts.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Books", "Clothing", "Electronics", "Sports"]);
        assert_eq!(counts[2].count, 2);
    }

    #[test]
    fn test_build_dashboard() {
        let dashboard = build_dashboard(sample());
        assert_eq!(dashboard.kpis.total_products, 4);
        assert_eq!(dashboard.kpis.total_categories, 4);
        assert_eq!(dashboard.kpis.low_stock_count, 2);
        // 8400 + 420 + 4320 + 0
        assert_eq!(dashboard.kpis.total_stock_value, Decimal::new(13140, 0));
        assert_eq!(dashboard.kpis.current_revenue, 31800);
        assert_eq!(dashboard.kpis.current_orders, 88);
        assert_eq!(dashboard.recent_products.len(), 4);
        assert_eq!(dashboard.monthly_stock.len(), 7);
        assert_eq!(dashboard.category_breakdown.len(), 6);
    }

    #[test]
    fn test_stock_value_totals_saturate() {
        let mut products = sample();
        products[0].price = Decimal::MAX;
        products[1].price = Decimal::MAX;

        let dashboard = build_dashboard(products);
        assert_eq!(dashboard.kpis.total_stock_value, Decimal::MAX);
        assert_eq!(dashboard.top_products[0].stock_value, Decimal::MAX);
    }

    #[test]
    fn test_empty_store() {
        let dashboard = build_dashboard(Vec::new());
        assert_eq!(dashboard.kpis.total_products, 0);
        assert!(dashboard.kpis.total_stock_value.is_zero());
        assert!(dashboard.top_products.is_empty());
    }
}
