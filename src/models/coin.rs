use diesel::prelude::*;
use diesel_derive_enum::DbEnum;
use jiff_diesel::DateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, DbEnum)]
#[db_enum(existing_type_path = "crate::schema::sql_types::CoinReason")]
#[serde(rename_all = "snake_case")]
pub enum CoinReason {
    SignupBonus,
    ReferralBonus,
    ReferredBonus,
    Redemption,
    Adjustment,
}

/// Ledger row; `amount` is negative for debits.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::coin_transactions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CoinTransaction {
    pub id: i64,
    pub user_id: i32,
    pub amount: i64,
    pub reason: CoinReason,
    pub counterparty_id: Option<i32>,
    pub note: Option<String>,
    pub created_at: DateTime,
}

#[derive(Debug, Insertable, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::coin_transactions)]
pub struct NewCoinTransaction {
    pub user_id: i32,
    pub amount: i64,
    pub reason: CoinReason,
    pub counterparty_id: Option<i32>,
    pub note: Option<String>,
}
