//! Order handlers.

use axum::{
    Extension,
    extract::{Path, State},
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::ORDER_TAG;
use crate::api::dto::common::non_blank;
use crate::api::dto::{
    ApiResponse, CreateOrderRequest, ErrorResponse, OrderListQuery, OrderResponse,
    PagedResponse, PaginationParams, UpdateOrderStatusRequest,
};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::models::UserRole;
use crate::services::OrderDraft;
use crate::state::AppState;
use crate::utils::validate::{ValidatedJson, ValidatedQuery};

/// Creates order routes.
///
/// Routes:
/// - GET /, POST /          - My orders / place an order
/// - GET /{id}              - Order detail (participants only)
/// - PATCH /{id}/status     - Move the order along its lifecycle
pub fn order_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_orders, create_order))
        .routes(routes!(get_order))
        .routes(routes!(update_order_status))
}

/// GET /api/orders - Orders where I am the brand or the creator
#[utoipa::path(
    get,
    path = "/",
    tag = ORDER_TAG,
    params(PaginationParams, OrderListQuery),
    responses(
        (status = 200, description = "Paged orders", body = ApiResponse<PagedResponse<OrderResponse>>)
    ),
    security(("bearerAuth" = []))
)]
async fn list_orders(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
    ValidatedQuery(query): ValidatedQuery<OrderListQuery>,
) -> AppResult<ApiResponse<PagedResponse<OrderResponse>>> {
    let page = params.resolve(&state.pagination)?;
    let (orders, total) = state
        .services
        .orders
        .list_for_user(auth_user.user_id, query.status, page.offset(), page.limit())
        .await?;

    let orders = orders.into_iter().map(OrderResponse::from).collect();
    Ok(ApiResponse::ok(
        "Orders retrieved",
        PagedResponse::new(orders, page, total),
    ))
}

/// POST /api/orders - Place an order with a creator (brands and admins)
#[utoipa::path(
    post,
    path = "/",
    tag = ORDER_TAG,
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = ApiResponse<OrderResponse>),
        (status = 400, description = "Invalid data or missing amount", body = ErrorResponse),
        (status = 403, description = "Caller is not a brand", body = ErrorResponse),
        (status = 404, description = "Creator or product not found", body = ErrorResponse),
        (status = 422, description = "Target is not a creator or product unusable", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn create_order(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<CreateOrderRequest>,
) -> AppResult<ApiResponse<OrderResponse>> {
    auth_user.require_role(&[UserRole::Brand, UserRole::Admin])?;

    let draft = OrderDraft {
        creator_id: payload.creator_id,
        product_id: payload.product_id,
        title: payload.title.trim().to_string(),
        description: non_blank(payload.description),
        amount: payload.amount,
    };
    let order = state
        .services
        .orders
        .create(auth_user.user_id, draft)
        .await?;
    Ok(ApiResponse::created("Order created", order.into()))
}

/// GET /api/orders/{id}
#[utoipa::path(
    get,
    path = "/{id}",
    tag = ORDER_TAG,
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order", body = ApiResponse<OrderResponse>),
        (status = 403, description = "Not a participant", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn get_order(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> AppResult<ApiResponse<OrderResponse>> {
    let order = state
        .services
        .orders
        .get_for_participant(id, auth_user.user_id)
        .await?;
    Ok(ApiResponse::ok("Order retrieved", order.into()))
}

/// PATCH /api/orders/{id}/status
///
/// Creators accept or reject pending orders; brands cancel pending or
/// accepted orders and complete accepted ones.
#[utoipa::path(
    patch,
    path = "/{id}/status",
    tag = ORDER_TAG,
    params(("id" = i32, Path, description = "Order ID")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = ApiResponse<OrderResponse>),
        (status = 403, description = "Not a participant", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse),
        (status = 422, description = "Transition not allowed", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn update_order_status(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateOrderStatusRequest>,
) -> AppResult<ApiResponse<OrderResponse>> {
    let order = state
        .services
        .orders
        .update_status(id, auth_user.user_id, payload.status)
        .await?;
    Ok(ApiResponse::ok(
        format!("Order {}", order.status.as_str()),
        order.into(),
    ))
}
