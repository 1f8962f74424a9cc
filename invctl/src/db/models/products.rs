//! Storage models for products.

use crate::api::models::products::ProductCreate;
use crate::types::ProductId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Storage request for creating a new product
#[derive(Debug, Clone)]
pub struct ProductCreateDBRequest {
    pub name: String,
    pub sku: String,
    pub price: Decimal,
    pub quantity: u32,
    pub low_stock_at: u32,
    pub category: String,
    pub description: String,
    pub image: Option<String>,
}

impl ProductCreateDBRequest {
    /// Build from an already validated API request.
    pub fn new(create: ProductCreate) -> Self {
        Self {
            name: create.name,
            sku: create.sku,
            price: create.price,
            quantity: create.quantity,
            low_stock_at: create.low_stock_at,
            category: create.category,
            description: create.description,
            image: create.image,
        }
    }
}

/// Storage response for a product
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDBResponse {
    pub id: ProductId,
    pub name: String,
    pub sku: String,
    pub price: Decimal,
    pub quantity: u32,
    pub low_stock_at: u32,
    pub category: String,
    pub description: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ProductDBResponse {
    /// A threshold of zero disables the alert.
    pub fn is_low_stock(&self) -> bool {
        self.low_stock_at > 0 && self.quantity <= self.low_stock_at
    }

    /// Price times quantity on hand, saturating at `Decimal::MAX`.
    pub fn stock_value(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn product(quantity: u32, low_stock_at: u32) -> ProductDBResponse {
        ProductDBResponse {
            id: Uuid::new_v4(),
            name: "Widget".to_string(),
            sku: String::new(),
            price: Decimal::new(1250, 2),
            quantity,
            low_stock_at,
            category: "Other".to_string(),
            description: String::new(),
            image: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_low_stock_rule() {
        assert!(product(3, 5).is_low_stock());
        assert!(product(5, 5).is_low_stock());
        assert!(!product(6, 5).is_low_stock());
        // threshold of zero never alerts, even when empty
        assert!(!product(0, 0).is_low_stock());
    }

    #[test]
    fn test_stock_value() {
        assert_eq!(product(4, 0).stock_value(), Decimal::new(5000, 2));
    }

    #[test]
    fn test_stock_value_saturates() {
        let huge = ProductDBResponse {
            price: Decimal::MAX,
            ..product(2, 0)
        };
        assert_eq!(huge.stock_value(), Decimal::MAX);
    }
}
