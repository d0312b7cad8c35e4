//! Orders between brands and creators.

use bigdecimal::BigDecimal;

use crate::error::{AppError, AppResult};
use crate::models::{NewNotification, NewOrder, NotificationKind, Order, OrderStatus, UserRole};
use crate::repositories::{OrderRepository, ProductRepository, UserRepository};
use crate::rules::{OrderParty, order_transition_allowed};
use crate::services::{NotificationService, UserService};

/// Order as requested by a brand, before product defaults are applied.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub creator_id: i32,
    pub product_id: Option<i32>,
    pub title: String,
    pub description: Option<String>,
    pub amount: Option<BigDecimal>,
}

#[derive(Clone)]
pub struct OrderService {
    repo: OrderRepository,
    users: UserRepository,
    products: ProductRepository,
    user_service: UserService,
    notifications: NotificationService,
}

impl OrderService {
    pub fn new(
        repo: OrderRepository,
        users: UserRepository,
        products: ProductRepository,
        user_service: UserService,
        notifications: NotificationService,
    ) -> Self {
        Self {
            repo,
            users,
            products,
            user_service,
            notifications,
        }
    }

    /// Places a pending order with a creator. A product, when given, must be
    /// one of the brand's active products; its price is the default amount.
    pub async fn create(&self, brand_id: i32, draft: OrderDraft) -> AppResult<Order> {
        let creator = self
            .users
            .find_by_id(draft.creator_id)
            .await?
            .ok_or_else(|| AppError::not_found("user", "id", draft.creator_id))?;
        if creator.role != UserRole::Creator {
            return Err(AppError::unprocessable("Orders can only be placed with creators"));
        }
        if creator.id == brand_id {
            return Err(AppError::unprocessable("You cannot order from yourself"));
        }

        let product_price = match draft.product_id {
            Some(product_id) => {
                let product = self
                    .products
                    .find_by_id(product_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("product", "id", product_id))?;
                if product.brand_id != brand_id {
                    return Err(AppError::unprocessable("The product belongs to another brand"));
                }
                if !product.is_active {
                    return Err(AppError::unprocessable("The product is not active"));
                }
                Some(product.price)
            }
            None => None,
        };

        let amount = draft
            .amount
            .or(product_price)
            .ok_or_else(|| AppError::validation("amount", "Amount is required without a product"))?;

        let order = self
            .repo
            .create(NewOrder {
                brand_id,
                creator_id: creator.id,
                product_id: draft.product_id,
                title: draft.title.trim().to_string(),
                description: draft.description,
                amount,
                status: OrderStatus::Pending,
            })
            .await?;
        tracing::info!(order_id = order.id, brand_id, creator_id = creator.id, "order created");

        self.notifications
            .notify(
                NewNotification::new(
                    creator.id,
                    NotificationKind::OrderCreated,
                    "New order",
                    format!("You received a new order: {}", order.title),
                )
                .with_reference(order.id),
            )
            .await;

        Ok(order)
    }

    pub async fn list_for_user(
        &self,
        user_id: i32,
        status: Option<OrderStatus>,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Order>, i64)> {
        self.repo.list_for_user(user_id, status, offset, limit).await
    }

    /// Only the brand and the creator of an order may see it.
    pub async fn get_for_participant(&self, order_id: i32, user_id: i32) -> AppResult<Order> {
        let order = self
            .repo
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| AppError::not_found("order", "id", order_id))?;

        if !order.is_participant(user_id) {
            return Err(AppError::forbidden("You are not a participant of this order"));
        }
        Ok(order)
    }

    pub async fn update_status(
        &self,
        order_id: i32,
        user_id: i32,
        to: OrderStatus,
    ) -> AppResult<Order> {
        let order = self.get_for_participant(order_id, user_id).await?;
        let party = if order.brand_id == user_id {
            OrderParty::Brand
        } else {
            OrderParty::Creator
        };

        if !order_transition_allowed(party, order.status, to) {
            return Err(AppError::unprocessable(format!(
                "Cannot change order status from {} to {}",
                order.status, to
            )));
        }

        let updated = self
            .repo
            .transition(order_id, order.status, to)
            .await?
            .ok_or_else(|| AppError::unprocessable("Order status changed concurrently"))?;
        tracing::info!(
            order_id,
            user_id,
            from = order.status.as_str(),
            to = to.as_str(),
            "order status changed"
        );

        self.notifications
            .notify(
                NewNotification::new(
                    updated.counterpart_of(user_id),
                    NotificationKind::OrderStatus,
                    "Order updated",
                    format!("Order \"{}\" is now {}.", updated.title, to),
                )
                .with_reference(updated.id),
            )
            .await;

        if to == OrderStatus::Completed {
            self.user_service
                .refresh_badge_quietly(updated.creator_id)
                .await;
        }

        Ok(updated)
    }
}
