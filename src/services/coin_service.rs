//! Coin balance, ledger history and redemptions.

use crate::error::{AppError, AppResult};
use crate::models::CoinTransaction;
use crate::repositories::CoinRepository;

#[derive(Clone)]
pub struct CoinService {
    repo: CoinRepository,
}

impl CoinService {
    pub fn new(repo: CoinRepository) -> Self {
        Self { repo }
    }

    /// Current balance plus one page of the ledger, newest first.
    pub async fn overview(
        &self,
        user_id: i32,
        offset: i64,
        limit: i64,
    ) -> AppResult<(i64, Vec<CoinTransaction>, i64)> {
        let balance = self
            .repo
            .balance(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("user", "id", user_id))?;
        let (transactions, total) = self.repo.list_for_user(user_id, offset, limit).await?;
        Ok((balance, transactions, total))
    }

    /// Debits the balance; 422 when it does not cover `amount`.
    pub async fn redeem(
        &self,
        user_id: i32,
        amount: i64,
        note: Option<String>,
    ) -> AppResult<(i64, CoinTransaction)> {
        if amount <= 0 {
            return Err(AppError::validation("amount", "Amount must be positive"));
        }

        let (balance, transaction) = self.repo.redeem(user_id, amount, note).await?;
        tracing::info!(user_id, amount, balance, "coins redeemed");
        Ok((balance, transaction))
    }
}
