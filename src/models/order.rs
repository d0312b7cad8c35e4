use bigdecimal::BigDecimal;
use diesel::prelude::*;
use diesel_derive_enum::DbEnum;
use jiff_diesel::DateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, DbEnum)]
#[db_enum(existing_type_path = "crate::schema::sql_types::OrderStatus")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Accepted,
    Rejected,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Accepted,
        OrderStatus::Rejected,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Accepted => "accepted",
            OrderStatus::Rejected => "rejected",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Order {
    pub id: i32,
    pub brand_id: i32,
    pub creator_id: i32,
    pub product_id: Option<i32>,
    pub title: String,
    pub description: Option<String>,
    pub amount: BigDecimal,
    pub status: OrderStatus,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Order {
    pub fn is_participant(&self, user_id: i32) -> bool {
        self.brand_id == user_id || self.creator_id == user_id
    }

    /// The participant on the other side of `user_id`.
    pub fn counterpart_of(&self, user_id: i32) -> i32 {
        if self.brand_id == user_id {
            self.creator_id
        } else {
            self.brand_id
        }
    }
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::orders)]
pub struct NewOrder {
    pub brand_id: i32,
    pub creator_id: i32,
    pub product_id: Option<i32>,
    pub title: String,
    pub description: Option<String>,
    pub amount: BigDecimal,
    pub status: OrderStatus,
}
