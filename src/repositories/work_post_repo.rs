//! Work posts and the applications creators send to them.

use diesel::dsl::{not, now};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{
    ApplicationStatus, NewOrder, NewWorkApplication, NewWorkPost, Order, OrderStatus,
    UpdateWorkPost, WorkApplication, WorkPost, WorkPostStatus,
};
use crate::schema::{orders, work_applications, work_posts};

#[derive(Debug, Clone, Default)]
pub struct WorkPostFilter {
    pub status: Option<WorkPostStatus>,
    pub category: Option<String>,
    pub brand_id: Option<i32>,
}

impl WorkPostFilter {
    fn query(&self) -> work_posts::BoxedQuery<'static, Pg> {
        let mut query = work_posts::table.into_boxed();

        if let Some(status) = self.status {
            query = query.filter(work_posts::status.eq(status));
        }
        if let Some(category) = &self.category {
            query = query.filter(work_posts::categories.contains(vec![category.clone()]));
        }
        if let Some(brand_id) = self.brand_id {
            query = query.filter(work_posts::brand_id.eq(brand_id));
        }

        query
    }
}

#[derive(Clone)]
pub struct WorkPostRepository {
    pool: AsyncDbPool,
}

impl WorkPostRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new_post: NewWorkPost) -> AppResult<WorkPost> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(work_posts::table)
            .values(&new_post)
            .returning(WorkPost::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn find_by_id(&self, post_id: i32) -> AppResult<Option<WorkPost>> {
        let mut conn = self.pool.get().await?;

        work_posts::table
            .find(post_id)
            .select(WorkPost::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    pub async fn update(&self, post_id: i32, changes: UpdateWorkPost) -> AppResult<WorkPost> {
        let mut conn = self.pool.get().await?;

        diesel::update(work_posts::table.find(post_id))
            .set((&changes, work_posts::updated_at.eq(now)))
            .returning(WorkPost::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn delete(&self, post_id: i32) -> AppResult<usize> {
        let mut conn = self.pool.get().await?;

        diesel::delete(work_posts::table.find(post_id))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn list(
        &self,
        filter: &WorkPostFilter,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<WorkPost>, i64)> {
        let mut conn = self.pool.get().await?;

        let total = filter.query().count().get_result(&mut conn).await?;
        let items = filter
            .query()
            .order((work_posts::created_at.desc(), work_posts::id.desc()))
            .offset(offset)
            .limit(limit)
            .select(WorkPost::as_select())
            .load(&mut conn)
            .await?;

        Ok((items, total))
    }

    /// Open posts sharing a category with `categories` that `creator_id`
    /// has not applied to and does not own. Ranking happens in memory.
    pub async fn open_candidates(
        &self,
        creator_id: i32,
        categories: &[String],
    ) -> AppResult<Vec<WorkPost>> {
        if categories.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await?;

        let applied = work_applications::table
            .filter(work_applications::creator_id.eq(creator_id))
            .select(work_applications::work_post_id);

        work_posts::table
            .filter(work_posts::status.eq(WorkPostStatus::Open))
            .filter(work_posts::brand_id.ne(creator_id))
            .filter(work_posts::categories.overlaps_with(categories.to_vec()))
            .filter(not(work_posts::id.eq_any(applied)))
            .select(WorkPost::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn count_open_by_brand(&self, brand_id: i32) -> AppResult<i64> {
        let mut conn = self.pool.get().await?;

        work_posts::table
            .filter(work_posts::brand_id.eq(brand_id))
            .filter(work_posts::status.eq(WorkPostStatus::Open))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    // ------------------------------------------------------------------
    // Applications
    // ------------------------------------------------------------------

    /// A second application to the same post is a unique violation.
    pub async fn create_application(
        &self,
        new_application: NewWorkApplication,
    ) -> AppResult<WorkApplication> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(work_applications::table)
            .values(&new_application)
            .returning(WorkApplication::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn find_application(&self, application_id: i32) -> AppResult<Option<WorkApplication>> {
        let mut conn = self.pool.get().await?;

        work_applications::table
            .find(application_id)
            .select(WorkApplication::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    pub async fn list_applications_for_post(
        &self,
        post_id: i32,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<WorkApplication>, i64)> {
        let mut conn = self.pool.get().await?;

        let total = work_applications::table
            .filter(work_applications::work_post_id.eq(post_id))
            .count()
            .get_result(&mut conn)
            .await?;
        let items = work_applications::table
            .filter(work_applications::work_post_id.eq(post_id))
            .order((work_applications::created_at.desc(), work_applications::id.desc()))
            .offset(offset)
            .limit(limit)
            .select(WorkApplication::as_select())
            .load(&mut conn)
            .await?;

        Ok((items, total))
    }

    pub async fn list_applications_for_creator(
        &self,
        creator_id: i32,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<WorkApplication>, i64)> {
        let mut conn = self.pool.get().await?;

        let total = work_applications::table
            .filter(work_applications::creator_id.eq(creator_id))
            .count()
            .get_result(&mut conn)
            .await?;
        let items = work_applications::table
            .filter(work_applications::creator_id.eq(creator_id))
            .order((work_applications::created_at.desc(), work_applications::id.desc()))
            .offset(offset)
            .limit(limit)
            .select(WorkApplication::as_select())
            .load(&mut conn)
            .await?;

        Ok((items, total))
    }

    pub async fn count_pending_for_creator(&self, creator_id: i32) -> AppResult<i64> {
        let mut conn = self.pool.get().await?;

        work_applications::table
            .filter(work_applications::creator_id.eq(creator_id))
            .filter(work_applications::status.eq(ApplicationStatus::Pending))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Pending applications on any of `brand_id`'s posts.
    pub async fn count_pending_for_brand(&self, brand_id: i32) -> AppResult<i64> {
        let mut conn = self.pool.get().await?;

        work_applications::table
            .inner_join(work_posts::table)
            .filter(work_posts::brand_id.eq(brand_id))
            .filter(work_applications::status.eq(ApplicationStatus::Pending))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Moves a pending application to `to`. `None` if it is no longer pending.
    pub async fn transition_application(
        &self,
        application_id: i32,
        to: ApplicationStatus,
    ) -> AppResult<Option<WorkApplication>> {
        let mut conn = self.pool.get().await?;

        diesel::update(
            work_applications::table
                .find(application_id)
                .filter(work_applications::status.eq(ApplicationStatus::Pending)),
        )
        .set((
            work_applications::status.eq(to),
            work_applications::updated_at.eq(now),
        ))
        .returning(WorkApplication::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(AppError::from)
    }

    /// Accepts a pending application and opens the resulting order in one
    /// transaction. The order starts out accepted and is linked back on the
    /// application.
    pub async fn accept_application(
        &self,
        application: &WorkApplication,
        post: &WorkPost,
    ) -> AppResult<(WorkApplication, Order)> {
        let mut conn = self.pool.get().await?;

        let application_id = application.id;
        let new_order = NewOrder {
            brand_id: post.brand_id,
            creator_id: application.creator_id,
            product_id: None,
            title: post.title.clone(),
            description: Some(post.description.clone()),
            amount: application
                .proposed_amount
                .clone()
                .unwrap_or_else(|| post.budget.clone()),
            status: OrderStatus::Accepted,
        };

        conn.transaction::<_, AppError, _>(|conn| {
            async move {
                let order: Order = diesel::insert_into(orders::table)
                    .values(&new_order)
                    .returning(Order::as_returning())
                    .get_result(conn)
                    .await?;

                let accepted: Option<WorkApplication> = diesel::update(
                    work_applications::table
                        .find(application_id)
                        .filter(work_applications::status.eq(ApplicationStatus::Pending)),
                )
                .set((
                    work_applications::status.eq(ApplicationStatus::Accepted),
                    work_applications::order_id.eq(Some(order.id)),
                    work_applications::updated_at.eq(now),
                ))
                .returning(WorkApplication::as_returning())
                .get_result(conn)
                .await
                .optional()?;

                match accepted {
                    Some(accepted) => Ok((accepted, order)),
                    None => Err(AppError::unprocessable(
                        "Application is no longer pending",
                    )),
                }
            }
            .scope_boxed()
        })
        .await
    }
}
