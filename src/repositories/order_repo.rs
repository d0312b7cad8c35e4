//! Order persistence.

use bigdecimal::{BigDecimal, Zero};
use diesel::dsl::{count_star, now, sum};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{NewOrder, Order, OrderStatus};
use crate::schema::orders;

/// Orders where `user_id` is the brand or the creator.
fn participant_orders(user_id: i32) -> orders::BoxedQuery<'static, Pg> {
    orders::table
        .filter(
            orders::brand_id
                .eq(user_id)
                .or(orders::creator_id.eq(user_id)),
        )
        .into_boxed()
}

#[derive(Clone)]
pub struct OrderRepository {
    pool: AsyncDbPool,
}

impl OrderRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new_order: NewOrder) -> AppResult<Order> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(orders::table)
            .values(&new_order)
            .returning(Order::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn find_by_id(&self, order_id: i32) -> AppResult<Option<Order>> {
        let mut conn = self.pool.get().await?;

        orders::table
            .find(order_id)
            .select(Order::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Moves the order from `from` to `to`. `None` when the order is no
    /// longer in `from`, e.g. a concurrent update got there first.
    pub async fn transition(
        &self,
        order_id: i32,
        from: OrderStatus,
        to: OrderStatus,
    ) -> AppResult<Option<Order>> {
        let mut conn = self.pool.get().await?;

        diesel::update(
            orders::table
                .find(order_id)
                .filter(orders::status.eq(from)),
        )
        .set((orders::status.eq(to), orders::updated_at.eq(now)))
        .returning(Order::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(AppError::from)
    }

    /// The user's orders on either side, newest first.
    pub async fn list_for_user(
        &self,
        user_id: i32,
        status: Option<OrderStatus>,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Order>, i64)> {
        let mut conn = self.pool.get().await?;

        let filtered = || {
            let query = participant_orders(user_id);
            match status {
                Some(status) => query.filter(orders::status.eq(status)),
                None => query,
            }
        };

        let total = filtered().count().get_result(&mut conn).await?;
        let items = filtered()
            .order((orders::created_at.desc(), orders::id.desc()))
            .offset(offset)
            .limit(limit)
            .select(Order::as_select())
            .load(&mut conn)
            .await?;

        Ok((items, total))
    }

    pub async fn status_counts(&self, user_id: i32) -> AppResult<Vec<(OrderStatus, i64)>> {
        let mut conn = self.pool.get().await?;

        orders::table
            .filter(
                orders::brand_id
                    .eq(user_id)
                    .or(orders::creator_id.eq(user_id)),
            )
            .group_by(orders::status)
            .select((orders::status, count_star()))
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Completed orders on either side.
    pub async fn count_completed(&self, user_id: i32) -> AppResult<i64> {
        let mut conn = self.pool.get().await?;

        participant_orders(user_id)
            .filter(orders::status.eq(OrderStatus::Completed))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Sum of completed order amounts on either side of the order.
    pub async fn completed_amount(&self, user_id: i32) -> AppResult<BigDecimal> {
        let mut conn = self.pool.get().await?;

        let total: Option<BigDecimal> = participant_orders(user_id)
            .filter(orders::status.eq(OrderStatus::Completed))
            .select(sum(orders::amount))
            .first(&mut conn)
            .await?;

        Ok(total.unwrap_or_else(BigDecimal::zero))
    }
}
