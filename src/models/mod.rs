mod coin;
mod group;
mod notification;
mod order;
mod product;
mod rating;
mod user;
mod work_post;

pub use coin::{CoinReason, CoinTransaction, NewCoinTransaction};
pub use group::{Group, GroupMember, NewGroup, NewGroupMember, UpdateGroup};
pub use notification::{NewNotification, Notification, NotificationKind};
pub use order::{NewOrder, Order, OrderStatus};
pub use product::{NewProduct, Product, UpdateProduct};
pub use rating::{NewRating, Rating};
pub use user::{NewUser, UpdateUser, User, UserBadge, UserRole};
pub use work_post::{
    ApplicationStatus, NewWorkApplication, NewWorkPost, UpdateWorkPost, WorkApplication, WorkPost,
    WorkPostStatus,
};
