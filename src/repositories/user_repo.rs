//! User repository for async database operations.

use diesel::dsl::now;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::config::RewardsConfig;
use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{NewUser, UpdateUser, User, UserBadge, UserRole};
use crate::repositories::coin_repo::apply_ledger;
use crate::repositories::like_pattern;
use crate::rules::coins::plan_signup_rewards;
use crate::schema::users;

/// Filters for the user directory.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub role: Option<UserRole>,
    pub category: Option<String>,
    pub search: Option<String>,
}

impl UserFilter {
    fn query(&self) -> users::BoxedQuery<'static, Pg> {
        let mut query = users::table.into_boxed();

        if let Some(role) = self.role {
            query = query.filter(users::role.eq(role));
        }
        if let Some(category) = &self.category {
            query = query.filter(users::categories.contains(vec![category.clone()]));
        }
        if let Some(search) = &self.search {
            let pattern = like_pattern(search);
            query = query.filter(
                users::username
                    .ilike(pattern.clone())
                    .or(users::full_name.ilike(pattern)),
            );
        }

        query
    }
}

/// Since `AsyncDbPool` (bb8::Pool) internally uses `Arc`, cloning is cheap.
#[derive(Clone)]
pub struct UserRepository {
    pool: AsyncDbPool,
}

impl UserRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Inserts the user and books the signup rewards in one transaction.
    /// Returns the user with the credited balance.
    pub async fn create_with_rewards(
        &self,
        new_user: NewUser,
        rewards: RewardsConfig,
    ) -> AppResult<User> {
        let mut conn = self.pool.get().await?;

        conn.transaction::<_, AppError, _>(|conn| {
            async move {
                let user: User = diesel::insert_into(users::table)
                    .values(&new_user)
                    .returning(User::as_returning())
                    .get_result(conn)
                    .await?;

                let entries = plan_signup_rewards(&rewards, user.id, new_user.referred_by);
                apply_ledger(conn, &entries).await?;

                let user = users::table
                    .find(user.id)
                    .select(User::as_select())
                    .first(conn)
                    .await?;
                Ok(user)
            }
            .scope_boxed()
        })
        .await
    }

    pub async fn find_by_id(&self, user_id: i32) -> AppResult<Option<User>> {
        let mut conn = self.pool.get().await?;

        users::table
            .find(user_id)
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    pub async fn find_by_email(&self, user_email: &str) -> AppResult<Option<User>> {
        let mut conn = self.pool.get().await?;

        users::table
            .filter(users::email.eq(user_email))
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    pub async fn find_by_referral_code(&self, code: &str) -> AppResult<Option<User>> {
        let mut conn = self.pool.get().await?;

        users::table
            .filter(users::referral_code.eq(code))
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    pub async fn referral_code_exists(&self, code: &str) -> AppResult<bool> {
        let mut conn = self.pool.get().await?;

        diesel::select(diesel::dsl::exists(
            users::table.filter(users::referral_code.eq(code)),
        ))
        .get_result(&mut conn)
        .await
        .map_err(AppError::from)
    }

    /// Applies a partial profile update; `updated_at` always moves.
    pub async fn update(&self, user_id: i32, changes: UpdateUser) -> AppResult<User> {
        let mut conn = self.pool.get().await?;

        diesel::update(users::table.find(user_id))
            .set((&changes, users::updated_at.eq(now)))
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn set_badge(&self, user_id: i32, badge: UserBadge) -> AppResult<usize> {
        let mut conn = self.pool.get().await?;

        diesel::update(users::table.find(user_id).filter(users::badge.ne(badge)))
            .set((users::badge.eq(badge), users::updated_at.eq(now)))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// One page of the directory, newest first, plus the total match count.
    pub async fn list(
        &self,
        filter: &UserFilter,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<User>, i64)> {
        let mut conn = self.pool.get().await?;

        let total = filter.query().count().get_result(&mut conn).await?;
        let items = filter
            .query()
            .order((users::created_at.desc(), users::id.desc()))
            .offset(offset)
            .limit(limit)
            .select(User::as_select())
            .load(&mut conn)
            .await?;

        Ok((items, total))
    }

    /// Users who signed up with `referrer_id`'s code, newest first.
    pub async fn list_referrals(
        &self,
        referrer_id: i32,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<User>, i64)> {
        let mut conn = self.pool.get().await?;

        let total = users::table
            .filter(users::referred_by.eq(referrer_id))
            .count()
            .get_result(&mut conn)
            .await?;
        let items = users::table
            .filter(users::referred_by.eq(referrer_id))
            .order((users::created_at.desc(), users::id.desc()))
            .offset(offset)
            .limit(limit)
            .select(User::as_select())
            .load(&mut conn)
            .await?;

        Ok((items, total))
    }
}
