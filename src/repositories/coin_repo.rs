//! Coin ledger persistence. `users.coins` is kept in step with the ledger.

use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{CoinTransaction, NewCoinTransaction};
use crate::rules::coins::redemption_entry;
use crate::schema::{coin_transactions, users};

/// Writes ledger rows and moves each user's balance by the entry amount.
/// Meant to run inside the caller's transaction.
pub(crate) async fn apply_ledger(
    conn: &mut AsyncPgConnection,
    entries: &[NewCoinTransaction],
) -> AppResult<Vec<CoinTransaction>> {
    if entries.is_empty() {
        return Ok(Vec::new());
    }

    let rows = diesel::insert_into(coin_transactions::table)
        .values(entries)
        .returning(CoinTransaction::as_returning())
        .get_results(conn)
        .await?;

    for entry in entries {
        diesel::update(users::table.find(entry.user_id))
            .set(users::coins.eq(users::coins + entry.amount))
            .execute(conn)
            .await?;
    }

    Ok(rows)
}

#[derive(Clone)]
pub struct CoinRepository {
    pool: AsyncDbPool,
}

impl CoinRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn balance(&self, user_id: i32) -> AppResult<Option<i64>> {
        let mut conn = self.pool.get().await?;

        users::table
            .find(user_id)
            .select(users::coins)
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Debits `amount` only if the balance covers it. Returns the new balance
    /// and the ledger row.
    pub async fn redeem(
        &self,
        user_id: i32,
        amount: i64,
        note: Option<String>,
    ) -> AppResult<(i64, CoinTransaction)> {
        let mut conn = self.pool.get().await?;

        conn.transaction::<_, AppError, _>(|conn| {
            async move {
                let balance: Option<i64> = diesel::update(
                    users::table
                        .find(user_id)
                        .filter(users::coins.ge(amount)),
                )
                .set(users::coins.eq(users::coins - amount))
                .returning(users::coins)
                .get_result(conn)
                .await
                .optional()?;

                let Some(balance) = balance else {
                    return Err(AppError::unprocessable("Insufficient coin balance"));
                };

                let row = diesel::insert_into(coin_transactions::table)
                    .values(&redemption_entry(user_id, amount, note))
                    .returning(CoinTransaction::as_returning())
                    .get_result(conn)
                    .await?;

                Ok((balance, row))
            }
            .scope_boxed()
        })
        .await
    }

    /// Ledger rows for a user, newest first.
    pub async fn list_for_user(
        &self,
        user_id: i32,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<CoinTransaction>, i64)> {
        let mut conn = self.pool.get().await?;

        let total = coin_transactions::table
            .filter(coin_transactions::user_id.eq(user_id))
            .count()
            .get_result(&mut conn)
            .await?;
        let items = coin_transactions::table
            .filter(coin_transactions::user_id.eq(user_id))
            .order(coin_transactions::id.desc())
            .offset(offset)
            .limit(limit)
            .select(CoinTransaction::as_select())
            .load(&mut conn)
            .await?;

        Ok((items, total))
    }
}
