//! Coin balance and ledger DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::dto::PagedResponse;
use crate::api::dto::common::{format_timestamp, non_blank};
use crate::models::{CoinReason, CoinTransaction};

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct RedeemCoinsRequest {
    #[validate(range(min = 1, message = "Amount must be positive"))]
    #[schema(minimum = 1, example = 40)]
    pub amount: i64,
    #[validate(length(max = 255))]
    pub note: Option<String>,
}

impl RedeemCoinsRequest {
    pub fn note(&self) -> Option<String> {
        non_blank(self.note.clone())
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CoinTransactionResponse {
    pub id: i64,
    /// Positive for credits, negative for redemptions
    #[schema(example = -40)]
    pub amount: i64,
    pub reason: CoinReason,
    pub counterparty_id: Option<i32>,
    pub note: Option<String>,
    pub created_at: String,
}

impl From<CoinTransaction> for CoinTransactionResponse {
    fn from(tx: CoinTransaction) -> Self {
        Self {
            id: tx.id,
            amount: tx.amount,
            reason: tx.reason,
            counterparty_id: tx.counterparty_id,
            note: tx.note,
            created_at: format_timestamp(tx.created_at),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CoinOverviewResponse {
    #[schema(example = 175)]
    pub balance: i64,
    pub transactions: PagedResponse<CoinTransactionResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RedeemCoinsResponse {
    /// Balance after the redemption
    pub balance: i64,
    pub transaction: CoinTransactionResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redeem_requires_positive_amount() {
        let request: RedeemCoinsRequest = serde_json::from_str(r#"{"amount": 0}"#).unwrap();
        assert!(request.validate().is_err());

        let request: RedeemCoinsRequest =
            serde_json::from_str(r#"{"amount": 10, "note": "  "}"#).unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.note(), None);
    }
}
