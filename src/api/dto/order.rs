//! Order DTOs.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::dto::common::{format_timestamp, validate_money, validate_title};
use crate::models::{Order, OrderStatus};

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateOrderRequest {
    #[validate(range(min = 1))]
    pub creator_id: i32,
    /// An active product of the ordering brand
    pub product_id: Option<i32>,
    #[validate(custom(function = "validate_title"))]
    #[schema(example = "Three reels for the spring launch")]
    pub title: String,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    /// Required without a product; defaults to the product price otherwise
    #[validate(custom(function = "validate_money"))]
    #[schema(value_type = Option<String>, example = "450.00")]
    pub amount: Option<BigDecimal>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Default, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct OrderListQuery {
    pub status: Option<OrderStatus>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: i32,
    pub brand_id: i32,
    pub creator_id: i32,
    pub product_id: Option<i32>,
    pub title: String,
    pub description: Option<String>,
    #[schema(value_type = String, example = "450.00")]
    pub amount: BigDecimal,
    pub status: OrderStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            brand_id: order.brand_id,
            creator_id: order.creator_id,
            product_id: order.product_id,
            title: order.title,
            description: order.description,
            amount: order.amount,
            status: order.status,
            created_at: format_timestamp(order.created_at),
            updated_at: format_timestamp(order.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_request_parses_snake_case() {
        let request: UpdateOrderStatusRequest =
            serde_json::from_str(r#"{"status": "completed"}"#).unwrap();
        assert_eq!(request.status, OrderStatus::Completed);
        assert!(serde_json::from_str::<UpdateOrderStatusRequest>(r#"{"status": "done"}"#).is_err());
    }

    #[test]
    fn test_create_order_validation() {
        let request: CreateOrderRequest =
            serde_json::from_str(r#"{"creator_id": 3, "title": "", "amount": "-5"}"#).unwrap();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
        assert!(errors.field_errors().contains_key("amount"));

        let request: CreateOrderRequest =
            serde_json::from_str(r#"{"creator_id": 3, "title": "Reel", "product_id": 2}"#).unwrap();
        assert!(request.validate().is_ok());
        assert!(request.amount.is_none());
    }

    #[test]
    fn test_order_title_and_amount_bounds() {
        let request: CreateOrderRequest = serde_json::from_str(
            r#"{"creator_id": 3, "title": "   ", "amount": "10000000000.00"}"#,
        )
        .unwrap();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
        assert!(errors.field_errors().contains_key("amount"));

        let request: CreateOrderRequest =
            serde_json::from_str(r#"{"creator_id": 3, "title": "Reel", "amount": "0.125"}"#).unwrap();
        assert!(request.validate().unwrap_err().field_errors().contains_key("amount"));
    }
}
