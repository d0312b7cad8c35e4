//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain; `response` and `error` hold the envelope
//! shared by every endpoint.

mod auth;
mod coins;
pub(crate) mod common;
mod dashboard;
mod error;
mod group;
mod health;
mod notification;
mod order;
mod pagination;
mod product;
mod rating;
mod response;
mod user;
mod work_post;

pub use auth::{AuthResponse, LoginRequest, RefreshTokenRequest, RegisterRequest, TokenResponse};
pub use coins::{
    CoinOverviewResponse, CoinTransactionResponse, RedeemCoinsRequest, RedeemCoinsResponse,
};
pub use dashboard::{DashboardResponse, OrdersByStatus};
pub use error::ErrorResponse;
pub use group::{
    AddMemberRequest, CreateGroupRequest, GroupAggregate, GroupDetailResponse,
    GroupMemberResponse, GroupResponse, UpdateGroupRequest,
};
pub use health::{ComponentHealth, HealthResponse, HealthStatus, StatusOnlyResponse};
pub use notification::{
    NotificationListQuery, NotificationResponse, ReadAllResponse, UnreadCountResponse,
};
pub use order::{CreateOrderRequest, OrderListQuery, OrderResponse, UpdateOrderStatusRequest};
pub use pagination::{Page, PagedResponse, PaginationMeta, PaginationParams};
pub use product::{CreateProductRequest, ProductListQuery, ProductResponse, UpdateProductRequest};
pub use rating::{CreateRatingRequest, RatingResponse, UserRatingsResponse};
pub use response::{ApiResponse, NoData};
pub use user::{
    PublicProfileResponse, UpdateProfileRequest, UserListQuery, UserProfileResponse, UserSummary,
};
pub use work_post::{
    ApplicationResponse, CreateApplicationRequest, CreateWorkPostRequest,
    MatchedWorkPostResponse, UpdateApplicationStatusRequest, UpdateWorkPostRequest,
    WorkPostListQuery, WorkPostResponse,
};
