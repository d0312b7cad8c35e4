//! Work posts, creator matching and applications.

use bigdecimal::BigDecimal;

use crate::error::{AppError, AppResult};
use crate::models::{
    ApplicationStatus, NewNotification, NewWorkApplication, NewWorkPost, NotificationKind,
    UpdateWorkPost, WorkApplication, WorkPost, WorkPostStatus,
};
use crate::repositories::{UserRepository, WorkPostFilter, WorkPostRepository};
use crate::rules::{ApplicationParty, Ranked, application_transition_allowed, rank_by_overlap};
use crate::services::NotificationService;

#[derive(Clone)]
pub struct WorkPostService {
    repo: WorkPostRepository,
    users: UserRepository,
    notifications: NotificationService,
}

impl WorkPostService {
    pub fn new(
        repo: WorkPostRepository,
        users: UserRepository,
        notifications: NotificationService,
    ) -> Self {
        Self {
            repo,
            users,
            notifications,
        }
    }

    pub async fn get(&self, post_id: i32) -> AppResult<WorkPost> {
        self.repo
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| AppError::not_found("work post", "id", post_id))
    }

    async fn get_owned(&self, post_id: i32, brand_id: i32) -> AppResult<WorkPost> {
        let post = self.get(post_id).await?;
        if post.brand_id != brand_id {
            return Err(AppError::forbidden("Only the posting brand can manage this work post"));
        }
        Ok(post)
    }

    pub async fn list(
        &self,
        filter: &WorkPostFilter,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<WorkPost>, i64)> {
        self.repo.list(filter, offset, limit).await
    }

    pub async fn create(&self, new_post: NewWorkPost) -> AppResult<WorkPost> {
        let post = self.repo.create(new_post).await?;
        tracing::info!(work_post_id = post.id, brand_id = post.brand_id, "work post created");
        Ok(post)
    }

    pub async fn update(
        &self,
        post_id: i32,
        brand_id: i32,
        changes: UpdateWorkPost,
    ) -> AppResult<WorkPost> {
        self.get_owned(post_id, brand_id).await?;
        self.repo.update(post_id, changes).await
    }

    /// Closing a closed post is a no-op.
    pub async fn close(&self, post_id: i32, brand_id: i32) -> AppResult<WorkPost> {
        let post = self.get_owned(post_id, brand_id).await?;
        if post.status == WorkPostStatus::Closed {
            return Ok(post);
        }

        let closed = self
            .repo
            .update(
                post_id,
                UpdateWorkPost {
                    status: Some(WorkPostStatus::Closed),
                    ..Default::default()
                },
            )
            .await?;
        tracing::info!(work_post_id = post_id, brand_id, "work post closed");
        Ok(closed)
    }

    pub async fn delete(&self, post_id: i32, brand_id: i32) -> AppResult<()> {
        self.get_owned(post_id, brand_id).await?;
        self.repo.delete(post_id).await?;
        tracing::info!(work_post_id = post_id, brand_id, "work post deleted");
        Ok(())
    }

    /// Open posts ranked by categories shared with the creator, best match
    /// first and newest first among equals.
    pub async fn matching(&self, creator_id: i32) -> AppResult<Vec<Ranked<WorkPost>>> {
        let creator = self
            .users
            .find_by_id(creator_id)
            .await?
            .ok_or_else(|| AppError::not_found("user", "id", creator_id))?;

        let candidates = self
            .repo
            .open_candidates(creator_id, &creator.categories)
            .await?;

        Ok(rank_by_overlap(
            &creator.categories,
            candidates,
            |post| post.categories.as_slice(),
            |post| (post.created_at.to_jiff(), post.id),
        ))
    }

    pub async fn apply(
        &self,
        post_id: i32,
        creator_id: i32,
        cover_letter: Option<String>,
        proposed_amount: Option<BigDecimal>,
    ) -> AppResult<WorkApplication> {
        let post = self.get(post_id).await?;
        if post.status != WorkPostStatus::Open {
            return Err(AppError::unprocessable("This work post is closed"));
        }
        if post.brand_id == creator_id {
            return Err(AppError::unprocessable("You cannot apply to your own work post"));
        }

        let application = self
            .repo
            .create_application(NewWorkApplication {
                work_post_id: post_id,
                creator_id,
                cover_letter,
                proposed_amount,
            })
            .await?;
        tracing::info!(
            application_id = application.id,
            work_post_id = post_id,
            creator_id,
            "application submitted"
        );

        self.notifications
            .notify(
                NewNotification::new(
                    post.brand_id,
                    NotificationKind::ApplicationReceived,
                    "New application",
                    format!("A creator applied to \"{}\".", post.title),
                )
                .with_reference(application.id),
            )
            .await;

        Ok(application)
    }

    pub async fn applications_for_post(
        &self,
        post_id: i32,
        brand_id: i32,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<WorkApplication>, i64)> {
        self.get_owned(post_id, brand_id).await?;
        self.repo
            .list_applications_for_post(post_id, offset, limit)
            .await
    }

    pub async fn applications_for_creator(
        &self,
        creator_id: i32,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<WorkApplication>, i64)> {
        self.repo
            .list_applications_for_creator(creator_id, offset, limit)
            .await
    }

    /// The post owner accepts or rejects, the applicant withdraws. Accepting
    /// opens an accepted order for the proposed amount (or the budget).
    pub async fn update_application_status(
        &self,
        post_id: i32,
        application_id: i32,
        user_id: i32,
        to: ApplicationStatus,
    ) -> AppResult<WorkApplication> {
        let application = self
            .repo
            .find_application(application_id)
            .await?
            .filter(|a| a.work_post_id == post_id)
            .ok_or_else(|| AppError::not_found("application", "id", application_id))?;
        let post = self.get(post_id).await?;

        let party = if post.brand_id == user_id {
            ApplicationParty::PostOwner
        } else if application.creator_id == user_id {
            ApplicationParty::Applicant
        } else {
            return Err(AppError::forbidden("You are not a party to this application"));
        };

        if !application_transition_allowed(party, application.status, to) {
            return Err(AppError::unprocessable(format!(
                "Cannot change application status from {} to {}",
                application.status.as_str(),
                to.as_str()
            )));
        }

        let (updated, message) = if to == ApplicationStatus::Accepted {
            let (accepted, order) = self.repo.accept_application(&application, &post).await?;
            tracing::info!(application_id, order_id = order.id, "application accepted");
            let message = format!(
                "Your application to \"{}\" was accepted. Order #{} was created.",
                post.title, order.id
            );
            (accepted, message)
        } else {
            let updated = self
                .repo
                .transition_application(application_id, to)
                .await?
                .ok_or_else(|| AppError::unprocessable("Application is no longer pending"))?;
            tracing::info!(application_id, to = to.as_str(), "application status changed");
            let message = format!(
                "The application to \"{}\" is now {}.",
                post.title,
                to.as_str()
            );
            (updated, message)
        };

        let recipient = match party {
            ApplicationParty::PostOwner => application.creator_id,
            ApplicationParty::Applicant => post.brand_id,
        };
        self.notifications
            .notify(
                NewNotification::new(
                    recipient,
                    NotificationKind::ApplicationStatus,
                    "Application updated",
                    message,
                )
                .with_reference(application_id),
            )
            .await;

        Ok(updated)
    }
}
