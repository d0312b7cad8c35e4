//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories and handlers.

mod auth_service;
mod coin_service;
mod dashboard_service;
mod group_service;
mod notification_service;
mod order_service;
mod product_service;
mod rating_service;
mod user_service;
mod work_post_service;

pub use auth_service::{AuthService, Registration};
pub use coin_service::CoinService;
pub use dashboard_service::{Dashboard, DashboardService};
pub use group_service::{GroupDetail, GroupOverview, GroupService};
pub use notification_service::NotificationService;
pub use order_service::{OrderDraft, OrderService};
pub use product_service::ProductService;
pub use rating_service::RatingService;
pub use user_service::UserService;
pub use work_post_service::WorkPostService;

use crate::config::{JwtConfig, RewardsConfig};
use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// Cloning is cheap since underlying pools use `Arc` internally.
#[derive(Clone)]
pub struct Services {
    pub auth: AuthService,
    pub users: UserService,
    pub coins: CoinService,
    pub groups: GroupService,
    pub products: ProductService,
    pub orders: OrderService,
    pub ratings: RatingService,
    pub notifications: NotificationService,
    pub work_posts: WorkPostService,
    pub dashboard: DashboardService,
}

impl Services {
    pub fn new(repos: Repositories, jwt: JwtConfig, rewards: RewardsConfig) -> Self {
        let notifications = NotificationService::new(repos.notifications.clone());
        let users = UserService::new(
            repos.users.clone(),
            repos.orders.clone(),
            repos.ratings.clone(),
        );

        Self {
            auth: AuthService::new(repos.users.clone(), notifications.clone(), jwt, rewards),
            coins: CoinService::new(repos.coins),
            groups: GroupService::new(
                repos.groups,
                repos.users.clone(),
                repos.ratings.clone(),
                notifications.clone(),
            ),
            products: ProductService::new(repos.products.clone()),
            orders: OrderService::new(
                repos.orders.clone(),
                repos.users.clone(),
                repos.products,
                users.clone(),
                notifications.clone(),
            ),
            ratings: RatingService::new(
                repos.ratings,
                repos.orders.clone(),
                users.clone(),
                notifications.clone(),
            ),
            work_posts: WorkPostService::new(
                repos.work_posts.clone(),
                repos.users,
                notifications.clone(),
            ),
            dashboard: DashboardService::new(
                users.clone(),
                repos.orders,
                repos.notifications,
                repos.work_posts,
            ),
            notifications,
            users,
        }
    }
}
