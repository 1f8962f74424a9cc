//! Fixed sales history shown on the dashboard charts.
//!
//! There is no order data behind these; they are sample series for the last seven months.

use crate::api::models::dashboard::{CategoryShare, MonthlyRevenue, MonthlyStock};

// (month, revenue, orders)
const REVENUE: [(&str, u64, u32); 7] = [
    ("Aug", 18400, 52),
    ("Sep", 22100, 63),
    ("Oct", 19800, 58),
    ("Nov", 27500, 81),
    ("Dec", 34200, 97),
    ("Jan", 29100, 74),
    ("Feb", 31800, 88),
];

// (month, added, sold, current)
const STOCK: [(&str, u32, u32, u32); 7] = [
    ("Aug", 120, 95, 480),
    ("Sep", 145, 110, 515),
    ("Oct", 98, 130, 483),
    ("Nov", 200, 160, 523),
    ("Dec", 175, 210, 488),
    ("Jan", 230, 185, 533),
    ("Feb", 160, 140, 553),
];

const CATEGORIES: [(&str, u32, &str); 6] = [
    ("Electronics", 32, "#7c3aed"),
    ("Clothing", 24, "#6366f1"),
    ("Home & Garden", 18, "#0ea5e9"),
    ("Sports", 14, "#10b981"),
    ("Books", 8, "#f59e0b"),
    ("Other", 4, "#6b7280"),
];

pub fn monthly_revenue() -> Vec<MonthlyRevenue> {
    REVENUE
        .iter()
        .map(|&(month, revenue, orders)| MonthlyRevenue {
            month: month.to_string(),
            revenue,
            orders,
        })
        .collect()
}

pub fn monthly_stock() -> Vec<MonthlyStock> {
    STOCK
        .iter()
        .map(|&(month, added, sold, current)| MonthlyStock {
            month: month.to_string(),
            added,
            sold,
            current,
        })
        .collect()
}

pub fn category_breakdown() -> Vec<CategoryShare> {
    CATEGORIES
        .iter()
        .map(|&(name, value, color)| CategoryShare {
            name: name.to_string(),
            value,
            color: color.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_cover_the_same_months() {
        let revenue: Vec<_> = monthly_revenue().into_iter().map(|m| m.month).collect();
        let stock: Vec<_> = monthly_stock().into_iter().map(|m| m.month).collect();
        assert_eq!(revenue, stock);
        assert_eq!(revenue.first().map(String::as_str), Some("Aug"));
        assert_eq!(revenue.last().map(String::as_str), Some("Feb"));
    }

    #[test]
    fn test_category_shares_sum_to_100() {
        assert_eq!(category_breakdown().iter().map(|c| c.value).sum::<u32>(), 100);
    }
}
