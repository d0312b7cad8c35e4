//! Group and membership persistence.

use diesel::dsl::{count_star, now};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Group, GroupMember, NewGroup, NewGroupMember, UpdateGroup, User};
use crate::schema::{group_members, groups, users};

#[derive(Clone)]
pub struct GroupRepository {
    pool: AsyncDbPool,
}

impl GroupRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new_group: NewGroup) -> AppResult<Group> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(groups::table)
            .values(&new_group)
            .returning(Group::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn find_by_id(&self, group_id: i32) -> AppResult<Option<Group>> {
        let mut conn = self.pool.get().await?;

        groups::table
            .find(group_id)
            .select(Group::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    pub async fn update(&self, group_id: i32, changes: UpdateGroup) -> AppResult<Group> {
        let mut conn = self.pool.get().await?;

        diesel::update(groups::table.find(group_id))
            .set((&changes, groups::updated_at.eq(now)))
            .returning(Group::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Memberships go with the group (ON DELETE CASCADE).
    pub async fn delete(&self, group_id: i32) -> AppResult<usize> {
        let mut conn = self.pool.get().await?;

        diesel::delete(groups::table.find(group_id))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn list_by_owner(
        &self,
        owner_id: i32,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Group>, i64)> {
        let mut conn = self.pool.get().await?;

        let total = groups::table
            .filter(groups::owner_id.eq(owner_id))
            .count()
            .get_result(&mut conn)
            .await?;
        let items = groups::table
            .filter(groups::owner_id.eq(owner_id))
            .order((groups::created_at.desc(), groups::id.desc()))
            .offset(offset)
            .limit(limit)
            .select(Group::as_select())
            .load(&mut conn)
            .await?;

        Ok((items, total))
    }

    /// `(group_id, user_id)` for every member of the given groups.
    pub async fn member_ids(&self, group_ids: &[i32]) -> AppResult<Vec<(i32, i32)>> {
        let mut conn = self.pool.get().await?;

        group_members::table
            .filter(group_members::group_id.eq_any(group_ids))
            .select((group_members::group_id, group_members::user_id))
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn member_count(&self, group_id: i32) -> AppResult<i64> {
        let mut conn = self.pool.get().await?;

        group_members::table
            .filter(group_members::group_id.eq(group_id))
            .select(count_star())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Members with their user record, in the order they were added.
    pub async fn members(&self, group_id: i32) -> AppResult<Vec<(GroupMember, User)>> {
        let mut conn = self.pool.get().await?;

        group_members::table
            .inner_join(users::table)
            .filter(group_members::group_id.eq(group_id))
            .order((group_members::added_at.asc(), group_members::id.asc()))
            .select((GroupMember::as_select(), User::as_select()))
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// A second insert of the same pair fails with a unique violation.
    pub async fn add_member(&self, group_id: i32, user_id: i32) -> AppResult<GroupMember> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(group_members::table)
            .values(&NewGroupMember { group_id, user_id })
            .returning(GroupMember::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn remove_member(&self, group_id: i32, user_id: i32) -> AppResult<usize> {
        let mut conn = self.pool.get().await?;

        diesel::delete(
            group_members::table
                .filter(group_members::group_id.eq(group_id))
                .filter(group_members::user_id.eq(user_id)),
        )
        .execute(&mut conn)
        .await
        .map_err(AppError::from)
    }
}
