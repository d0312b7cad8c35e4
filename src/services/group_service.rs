//! Groups: owner-curated lists of users with rating aggregates.

use std::collections::HashMap;

use crate::error::{AppError, AppResult};
use crate::models::{
    Group, GroupMember, NewGroup, NewNotification, NotificationKind, UpdateGroup, User,
};
use crate::repositories::{GroupRepository, RatingRepository, UserRepository};
use crate::rules::RatingSummary;
use crate::services::NotificationService;

/// A group with its member count and the summary over every rating its
/// members received.
#[derive(Debug, Clone)]
pub struct GroupOverview {
    pub group: Group,
    pub member_count: i64,
    pub ratings: RatingSummary,
}

#[derive(Debug, Clone)]
pub struct GroupDetail {
    pub overview: GroupOverview,
    pub members: Vec<(GroupMember, User, RatingSummary)>,
}

/// Per-user `(score, count)` pairs from a batched rating query.
fn counts_by_user(rows: Vec<(i32, i16, i64)>) -> HashMap<i32, Vec<(i16, i64)>> {
    let mut by_user: HashMap<i32, Vec<(i16, i64)>> = HashMap::new();
    for (user_id, score, count) in rows {
        by_user.entry(user_id).or_default().push((score, count));
    }
    by_user
}

/// Combined summary over the given members.
fn summary_for(members: &[i32], counts: &HashMap<i32, Vec<(i16, i64)>>) -> RatingSummary {
    RatingSummary::from_counts(
        members
            .iter()
            .filter_map(|id| counts.get(id))
            .flatten()
            .copied(),
    )
}

#[derive(Clone)]
pub struct GroupService {
    repo: GroupRepository,
    users: UserRepository,
    ratings: RatingRepository,
    notifications: NotificationService,
}

impl GroupService {
    pub fn new(
        repo: GroupRepository,
        users: UserRepository,
        ratings: RatingRepository,
        notifications: NotificationService,
    ) -> Self {
        Self {
            repo,
            users,
            ratings,
            notifications,
        }
    }

    /// Missing group is 404, someone else's group is 403.
    pub async fn get_owned(&self, group_id: i32, owner_id: i32) -> AppResult<Group> {
        let group = self
            .repo
            .find_by_id(group_id)
            .await?
            .ok_or_else(|| AppError::not_found("group", "id", group_id))?;

        if group.owner_id != owner_id {
            return Err(AppError::forbidden("Only the group owner can access this group"));
        }
        Ok(group)
    }

    pub async fn list(
        &self,
        owner_id: i32,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<GroupOverview>, i64)> {
        let (groups, total) = self.repo.list_by_owner(owner_id, offset, limit).await?;

        let group_ids: Vec<i32> = groups.iter().map(|g| g.id).collect();
        let memberships = self.repo.member_ids(&group_ids).await?;

        let mut members_by_group: HashMap<i32, Vec<i32>> = HashMap::new();
        for (group_id, user_id) in &memberships {
            members_by_group.entry(*group_id).or_default().push(*user_id);
        }

        let mut user_ids: Vec<i32> = memberships.iter().map(|(_, user_id)| *user_id).collect();
        user_ids.sort_unstable();
        user_ids.dedup();
        let counts = counts_by_user(self.ratings.score_counts_for(&user_ids).await?);

        let overviews = groups
            .into_iter()
            .map(|group| {
                let members = members_by_group.remove(&group.id).unwrap_or_default();
                GroupOverview {
                    member_count: members.len() as i64,
                    ratings: summary_for(&members, &counts),
                    group,
                }
            })
            .collect();

        Ok((overviews, total))
    }

    pub async fn create(&self, new_group: NewGroup) -> AppResult<Group> {
        let group = self.repo.create(new_group).await?;
        tracing::info!(group_id = group.id, owner_id = group.owner_id, "group created");
        Ok(group)
    }

    pub async fn detail(&self, group_id: i32, owner_id: i32) -> AppResult<GroupDetail> {
        let group = self.get_owned(group_id, owner_id).await?;
        let rows = self.repo.members(group_id).await?;

        let member_ids: Vec<i32> = rows.iter().map(|(member, _)| member.user_id).collect();
        let counts = counts_by_user(self.ratings.score_counts_for(&member_ids).await?);

        let members = rows
            .into_iter()
            .map(|(member, user)| {
                let summary = summary_for(&[member.user_id], &counts);
                (member, user, summary)
            })
            .collect::<Vec<_>>();

        Ok(GroupDetail {
            overview: GroupOverview {
                group,
                member_count: members.len() as i64,
                ratings: summary_for(&member_ids, &counts),
            },
            members,
        })
    }

    pub async fn update(
        &self,
        group_id: i32,
        owner_id: i32,
        changes: UpdateGroup,
    ) -> AppResult<GroupOverview> {
        self.get_owned(group_id, owner_id).await?;
        let group = self.repo.update(group_id, changes).await?;
        self.overview(group).await
    }

    pub async fn delete(&self, group_id: i32, owner_id: i32) -> AppResult<()> {
        self.get_owned(group_id, owner_id).await?;
        self.repo.delete(group_id).await?;
        tracing::info!(group_id, owner_id, "group deleted");
        Ok(())
    }

    /// Adds `user_id`; adding yourself is refused and adding someone twice
    /// is a duplicate.
    pub async fn add_member(
        &self,
        group_id: i32,
        owner_id: i32,
        user_id: i32,
    ) -> AppResult<(GroupMember, User)> {
        let group = self.get_owned(group_id, owner_id).await?;

        if user_id == owner_id {
            return Err(AppError::unprocessable("You cannot add yourself to your own group"));
        }
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("user", "id", user_id))?;

        let member = self.repo.add_member(group_id, user_id).await?;
        tracing::info!(group_id, user_id, "group member added");

        self.notifications
            .notify(
                NewNotification::new(
                    user_id,
                    NotificationKind::GroupAdded,
                    "Added to a group",
                    format!("You were added to the group \"{}\".", group.name),
                )
                .with_reference(group_id),
            )
            .await;

        Ok((member, user))
    }

    pub async fn remove_member(&self, group_id: i32, owner_id: i32, user_id: i32) -> AppResult<()> {
        self.get_owned(group_id, owner_id).await?;

        if self.repo.remove_member(group_id, user_id).await? == 0 {
            return Err(AppError::not_found("group member", "user_id", user_id));
        }
        tracing::info!(group_id, user_id, "group member removed");
        Ok(())
    }

    async fn overview(&self, group: Group) -> AppResult<GroupOverview> {
        let memberships = self.repo.member_ids(&[group.id]).await?;
        let member_ids: Vec<i32> = memberships.into_iter().map(|(_, user_id)| user_id).collect();
        let counts = counts_by_user(self.ratings.score_counts_for(&member_ids).await?);

        Ok(GroupOverview {
            member_count: member_ids.len() as i64,
            ratings: summary_for(&member_ids, &counts),
            group,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_summary_pools_member_ratings() {
        let counts = counts_by_user(vec![(1, 5, 2), (1, 4, 1), (2, 3, 1), (9, 1, 10)]);

        let summary = summary_for(&[1, 2], &counts);
        assert_eq!(summary.count, 4);
        assert_eq!(summary.average, 4.25);
        assert_eq!(summary.distribution.five, 2);
        assert_eq!(summary.distribution.one, 0);
    }

    #[test]
    fn test_group_without_ratings_has_no_average() {
        let counts = counts_by_user(vec![(3, 4, 1)]);
        let summary = summary_for(&[1, 2], &counts);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.average_or_none(), None);
    }
}
