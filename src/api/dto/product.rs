//! Product catalogue DTOs.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::dto::common::{
    clearable, format_timestamp, non_blank, validate_money, validate_product_name,
};
use crate::models::{NewProduct, Product, UpdateProduct};

fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateProductRequest {
    #[validate(custom(function = "validate_product_name"))]
    #[schema(example = "Trail running shoe")]
    pub name: String,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_money"))]
    #[schema(value_type = String, example = "129.90")]
    pub price: BigDecimal,
    #[validate(length(max = 50))]
    pub category: Option<String>,
    #[validate(length(max = 500))]
    pub image_url: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl CreateProductRequest {
    pub fn into_new_product(self, brand_id: i32) -> NewProduct {
        NewProduct {
            brand_id,
            name: self.name.trim().to_string(),
            description: non_blank(self.description),
            price: self.price,
            category: non_blank(self.category).map(|c| c.to_lowercase()),
            image_url: non_blank(self.image_url),
            is_active: self.is_active,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateProductRequest {
    #[validate(custom(function = "validate_product_name"))]
    pub name: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_money"))]
    #[schema(value_type = Option<String>, example = "119.90")]
    pub price: Option<BigDecimal>,
    #[validate(length(max = 50))]
    pub category: Option<String>,
    #[validate(length(max = 500))]
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateProductRequest {
    pub fn into_update_product(self) -> UpdateProduct {
        UpdateProduct {
            name: self.name.map(|n| n.trim().to_string()),
            description: clearable(self.description),
            price: self.price,
            category: clearable(self.category).map(|c| c.map(|c| c.to_lowercase())),
            image_url: clearable(self.image_url),
            is_active: self.is_active,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct ProductListQuery {
    pub brand_id: Option<i32>,
    pub category: Option<String>,
    /// Only active (true) or only inactive (false) products
    pub active: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: i32,
    pub brand_id: i32,
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = String, example = "129.90")]
    pub price: BigDecimal,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            brand_id: product.brand_id,
            name: product.name,
            description: product.description,
            price: product.price,
            category: product.category,
            image_url: product.image_url,
            is_active: product.is_active,
            created_at: format_timestamp(product.created_at),
            updated_at: format_timestamp(product.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_accepts_string_and_defaults_active() {
        let request: CreateProductRequest =
            serde_json::from_str(r#"{"name": "Mug", "price": "12.50"}"#).unwrap();
        assert!(request.validate().is_ok());
        assert!(request.is_active);
    }

    #[test]
    fn test_negative_price_rejected() {
        let request: CreateProductRequest =
            serde_json::from_str(r#"{"name": "Mug", "price": "-1"}"#).unwrap();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));

        let update: UpdateProductRequest = serde_json::from_str(r#"{"price": "-3.00"}"#).unwrap();
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_into_new_product_lowercases_category() {
        let request: CreateProductRequest = serde_json::from_str(
            r#"{"name": " Mug ", "price": "12.50", "category": "Kitchen", "is_active": false}"#,
        )
        .unwrap();
        let product = request.into_new_product(9);
        assert_eq!(product.brand_id, 9);
        assert_eq!(product.name, "Mug");
        assert_eq!(product.category.as_deref(), Some("kitchen"));
        assert!(!product.is_active);
    }

    #[test]
    fn test_price_must_fit_numeric_column() {
        for price in ["12345678901.00", "1.005"] {
            let body = format!(r#"{{"name": "Mug", "price": "{price}"}}"#);
            let request: CreateProductRequest = serde_json::from_str(&body).unwrap();
            let errors = request.validate().unwrap_err();
            assert!(errors.field_errors().contains_key("price"), "{price}");

            let update: UpdateProductRequest =
                serde_json::from_str(&format!(r#"{{"price": "{price}"}}"#)).unwrap();
            assert!(update.validate().is_err(), "{price}");
        }
    }

    #[test]
    fn test_blank_name_rejected() {
        let request: CreateProductRequest =
            serde_json::from_str(r#"{"name": "   ", "price": "1.00"}"#).unwrap();
        assert!(request.validate().unwrap_err().field_errors().contains_key("name"));

        let update: UpdateProductRequest = serde_json::from_str(r#"{"name": "  "}"#).unwrap();
        assert!(update.validate().is_err());
    }
}
