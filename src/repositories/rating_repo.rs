//! Rating persistence and score aggregation queries.

use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{NewRating, Rating};
use crate::schema::ratings;

#[derive(Clone)]
pub struct RatingRepository {
    pool: AsyncDbPool,
}

impl RatingRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// A second rating for the same order by the same rater is a unique
    /// violation.
    pub async fn create(&self, new_rating: NewRating) -> AppResult<Rating> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(ratings::table)
            .values(&new_rating)
            .returning(Rating::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// `(score, count)` over every rating `ratee_id` received.
    pub async fn score_counts(&self, ratee_id: i32) -> AppResult<Vec<(i16, i64)>> {
        let mut conn = self.pool.get().await?;

        ratings::table
            .filter(ratings::ratee_id.eq(ratee_id))
            .group_by(ratings::score)
            .select((ratings::score, count_star()))
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// `(ratee_id, score, count)` for several users at once.
    pub async fn score_counts_for(&self, ratee_ids: &[i32]) -> AppResult<Vec<(i32, i16, i64)>> {
        if ratee_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await?;

        ratings::table
            .filter(ratings::ratee_id.eq_any(ratee_ids))
            .group_by((ratings::ratee_id, ratings::score))
            .select((ratings::ratee_id, ratings::score, count_star()))
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Ratings `ratee_id` received, newest first.
    pub async fn list_for_ratee(
        &self,
        ratee_id: i32,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Rating>, i64)> {
        let mut conn = self.pool.get().await?;

        let total = ratings::table
            .filter(ratings::ratee_id.eq(ratee_id))
            .count()
            .get_result(&mut conn)
            .await?;
        let items = ratings::table
            .filter(ratings::ratee_id.eq(ratee_id))
            .order((ratings::created_at.desc(), ratings::id.desc()))
            .offset(offset)
            .limit(limit)
            .select(Rating::as_select())
            .load(&mut conn)
            .await?;

        Ok((items, total))
    }
}
