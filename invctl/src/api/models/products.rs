//! API request/response models for products.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::LimitsConfig;
use crate::db::models::products::ProductDBResponse;
use crate::errors::Error;
use crate::types::ProductId;

pub const DEFAULT_CATEGORY: &str = "Other";

const REQUIRED_FIELDS_MESSAGE: &str = "name, price, and quantity are required.";

/// Upper bound on a unit price
pub const MAX_PRICE: f64 = 1_000_000_000.0;

/// Upper bound on price times quantity for a single product
pub const MAX_STOCK_VALUE: i64 = 1_000_000_000_000_000;

/// Body of `POST /api/products`, as submitted by the add-product form.
///
/// Everything is optional at the wire level so missing fields produce a 400 with a readable
/// message instead of a deserialization rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreateRequest {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<f64>,
    pub low_stock_at: Option<f64>,
    pub category: Option<String>,
    pub description: Option<String>,
    /// `data:image/...` URL
    pub image: Option<String>,
}

/// A validated product creation request
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub name: String,
    pub sku: String,
    pub price: Decimal,
    pub quantity: u32,
    pub low_stock_at: u32,
    pub category: String,
    pub description: String,
    pub image: Option<String>,
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn whole_number(field: &str, value: f64) -> Result<u32, Error> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::BadRequest {
            message: format!("{field} must be zero or more."),
        });
    }
    if value.fract() != 0.0 || value > f64::from(u32::MAX) {
        return Err(Error::BadRequest {
            message: format!("{field} must be a whole number."),
        });
    }
    Ok(value as u32)
}

impl ProductCreateRequest {
    pub fn validate(self, limits: &LimitsConfig) -> Result<ProductCreate, Error> {
        let name = trimmed(self.name);
        let (Some(name), Some(price), Some(quantity)) = (name, self.price, self.quantity) else {
            return Err(Error::BadRequest {
                message: REQUIRED_FIELDS_MESSAGE.to_string(),
            });
        };

        if !price.is_finite() || price < 0.0 {
            return Err(Error::BadRequest {
                message: "price must be zero or more.".to_string(),
            });
        }
        if price > MAX_PRICE {
            return Err(Error::BadRequest {
                message: format!("price must be at most {MAX_PRICE}."),
            });
        }
        let price = Decimal::try_from(price)
            .map_err(|_| Error::BadRequest {
                message: "price is out of range.".to_string(),
            })?
            .round_dp(2);

        let quantity = whole_number("quantity", quantity)?;
        let low_stock_at = match self.low_stock_at {
            Some(value) => whole_number("lowStockAt", value)?,
            None => 0,
        };

        match price.checked_mul(Decimal::from(quantity)) {
            Some(value) if value <= Decimal::from(MAX_STOCK_VALUE) => {}
            _ => {
                return Err(Error::BadRequest {
                    message: "price times quantity is too large.".to_string(),
                });
            }
        }

        let image = trimmed(self.image);
        if let Some(image) = &image {
            if !image.starts_with("data:image/") {
                return Err(Error::BadRequest {
                    message: "image must be a data:image URL.".to_string(),
                });
            }
            if image.len() > limits.max_image_bytes {
                return Err(Error::BadRequest {
                    message: format!("image must be at most {} KB.", limits.max_image_bytes / 1024),
                });
            }
        }

        Ok(ProductCreate {
            name,
            sku: trimmed(self.sku).unwrap_or_default(),
            price,
            quantity,
            low_stock_at,
            category: trimmed(self.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            description: trimmed(self.description).unwrap_or_default(),
            image,
        })
    }
}

/// A stored product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: ProductId,
    pub name: String,
    pub sku: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub quantity: u32,
    pub low_stock_at: u32,
    pub category: String,
    pub description: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ProductDBResponse> for ProductResponse {
    fn from(db: ProductDBResponse) -> Self {
        Self {
            id: db.id,
            name: db.name,
            sku: db.sku,
            price: db.price,
            quantity: db.quantity,
            low_stock_at: db.low_stock_at,
            category: db.category,
            description: db.description,
            image: db.image,
            created_at: db.created_at,
        }
    }
}

/// Generic success body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> ProductCreateRequest {
        ProductCreateRequest {
            name: Some("  Desk Lamp ".to_string()),
            price: Some(24.5),
            quantity: Some(12.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_applied() {
        let product = valid_request().validate(&LimitsConfig::default()).unwrap();
        assert_eq!(product.name, "Desk Lamp");
        assert_eq!(product.sku, "");
        assert_eq!(product.category, DEFAULT_CATEGORY);
        assert_eq!(product.description, "");
        assert_eq!(product.low_stock_at, 0);
        assert_eq!(product.image, None);
        assert_eq!(product.price, Decimal::new(245, 1));
    }

    #[test]
    fn test_required_fields() {
        for request in [
            ProductCreateRequest {
                name: None,
                ..valid_request()
            },
            ProductCreateRequest {
                name: Some("   ".to_string()),
                ..valid_request()
            },
            ProductCreateRequest {
                price: None,
                ..valid_request()
            },
            ProductCreateRequest {
                quantity: None,
                ..valid_request()
            },
        ] {
            let err = request.validate(&LimitsConfig::default()).unwrap_err();
            assert_eq!(err.user_message(), REQUIRED_FIELDS_MESSAGE);
        }
    }

    #[test]
    fn test_zero_price_and_quantity_are_allowed() {
        let request = ProductCreateRequest {
            price: Some(0.0),
            quantity: Some(0.0),
            ..valid_request()
        };
        assert!(request.validate(&LimitsConfig::default()).is_ok());
    }

    #[test]
    fn test_negative_numbers_rejected() {
        let negative_price = ProductCreateRequest {
            price: Some(-1.0),
            ..valid_request()
        };
        assert!(negative_price.validate(&LimitsConfig::default()).is_err());

        let fractional_quantity = ProductCreateRequest {
            quantity: Some(2.5),
            ..valid_request()
        };
        assert!(fractional_quantity.validate(&LimitsConfig::default()).is_err());

        let negative_threshold = ProductCreateRequest {
            low_stock_at: Some(-3.0),
            ..valid_request()
        };
        assert!(negative_threshold.validate(&LimitsConfig::default()).is_err());
    }

    #[test]
    fn test_oversized_values_rejected() {
        let huge_price = ProductCreateRequest {
            price: Some(5e28),
            quantity: Some(2.0),
            ..valid_request()
        };
        let err = huge_price.validate(&LimitsConfig::default()).unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);

        let huge_stock = ProductCreateRequest {
            price: Some(MAX_PRICE),
            quantity: Some(f64::from(u32::MAX)),
            ..valid_request()
        };
        let err = huge_stock.validate(&LimitsConfig::default()).unwrap_err();
        assert_eq!(err.user_message(), "price times quantity is too large.");

        let at_limit = ProductCreateRequest {
            price: Some(MAX_PRICE),
            quantity: Some(1000.0),
            ..valid_request()
        };
        assert!(at_limit.validate(&LimitsConfig::default()).is_ok());
    }

    #[test]
    fn test_image_rules() {
        let not_data_url = ProductCreateRequest {
            image: Some("https://example.com/x.png".to_string()),
            ..valid_request()
        };
        assert!(not_data_url.validate(&LimitsConfig::default()).is_err());

        let limits = LimitsConfig {
            max_image_bytes: 32,
            ..Default::default()
        };
        let too_big = ProductCreateRequest {
            image: Some(format!("data:image/png;base64,{}", "A".repeat(64))),
            ..valid_request()
        };
        assert!(too_big.validate(&limits).is_err());

        let small = ProductCreateRequest {
            image: Some("data:image/png;base64,AAAA".to_string()),
            ..valid_request()
        };
        assert!(small.validate(&limits).unwrap().image.is_some());
    }
}
