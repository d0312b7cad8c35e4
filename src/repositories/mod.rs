//! Repository layer for data access operations.
//!
//! Each repository owns a clone of the pool and checks out a connection per
//! call. Multi-statement writes run inside a diesel-async transaction.

mod coin_repo;
mod group_repo;
mod notification_repo;
mod order_repo;
mod product_repo;
mod rating_repo;
mod user_repo;
mod work_post_repo;

pub use coin_repo::CoinRepository;
pub use group_repo::GroupRepository;
pub use notification_repo::NotificationRepository;
pub use order_repo::OrderRepository;
pub use product_repo::{ProductFilter, ProductRepository};
pub use rating_repo::RatingRepository;
pub use user_repo::{UserFilter, UserRepository};
pub use work_post_repo::{WorkPostFilter, WorkPostRepository};

use crate::db::AsyncDbPool;

/// `ILIKE` pattern matching `term` anywhere, with wildcards in the term
/// taken literally.
pub(crate) fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.trim().chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Aggregates all repositories for convenient access.
///
/// Since `AsyncDbPool` uses `Arc` internally, cloning is cheap.
#[derive(Clone)]
pub struct Repositories {
    pub users: UserRepository,
    pub coins: CoinRepository,
    pub groups: GroupRepository,
    pub products: ProductRepository,
    pub orders: OrderRepository,
    pub ratings: RatingRepository,
    pub notifications: NotificationRepository,
    pub work_posts: WorkPostRepository,
}

impl Repositories {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            coins: CoinRepository::new(pool.clone()),
            groups: GroupRepository::new(pool.clone()),
            products: ProductRepository::new(pool.clone()),
            orders: OrderRepository::new(pool.clone()),
            ratings: RatingRepository::new(pool.clone()),
            notifications: NotificationRepository::new(pool.clone()),
            work_posts: WorkPostRepository::new(pool),
        }
    }
}
