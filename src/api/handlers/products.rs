//! Product handlers.

use axum::{
    Extension,
    extract::{Path, State},
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::PRODUCT_TAG;
use crate::api::dto::common::non_blank;
use crate::api::dto::{
    ApiResponse, CreateProductRequest, ErrorResponse, NoData, PagedResponse, PaginationParams,
    ProductListQuery, ProductResponse, UpdateProductRequest,
};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::models::UserRole;
use crate::repositories::ProductFilter;
use crate::state::AppState;
use crate::utils::validate::{ValidatedJson, ValidatedQuery};

/// Creates product routes.
///
/// Routes:
/// - GET /, POST /              - Browse / create products
/// - GET, PUT, DELETE /{id}     - Read, update, delete a product
pub fn product_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_products, create_product))
        .routes(routes!(get_product, update_product, delete_product))
}

/// GET /api/products - Browse products
#[utoipa::path(
    get,
    path = "/",
    tag = PRODUCT_TAG,
    params(PaginationParams, ProductListQuery),
    responses(
        (status = 200, description = "Paged products", body = ApiResponse<PagedResponse<ProductResponse>>)
    ),
    security(("bearerAuth" = []))
)]
async fn list_products(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
    ValidatedQuery(query): ValidatedQuery<ProductListQuery>,
) -> AppResult<ApiResponse<PagedResponse<ProductResponse>>> {
    let page = params.resolve(&state.pagination)?;
    let filter = ProductFilter {
        brand_id: query.brand_id,
        category: non_blank(query.category).map(|c| c.to_lowercase()),
        active: query.active,
    };

    let (products, total) = state
        .services
        .products
        .list(&filter, page.offset(), page.limit())
        .await?;

    let products = products.into_iter().map(ProductResponse::from).collect();
    Ok(ApiResponse::ok(
        "Products retrieved",
        PagedResponse::new(products, page, total),
    ))
}

/// POST /api/products - Create a product (brands and admins)
#[utoipa::path(
    post,
    path = "/",
    tag = PRODUCT_TAG,
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Invalid data", body = ErrorResponse),
        (status = 403, description = "Caller is not a brand", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn create_product(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<CreateProductRequest>,
) -> AppResult<ApiResponse<ProductResponse>> {
    auth_user.require_role(&[UserRole::Brand, UserRole::Admin])?;

    let product = state
        .services
        .products
        .create(payload.into_new_product(auth_user.user_id))
        .await?;
    Ok(ApiResponse::created("Product created", product.into()))
}

/// GET /api/products/{id}
#[utoipa::path(
    get,
    path = "/{id}",
    tag = PRODUCT_TAG,
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product", body = ApiResponse<ProductResponse>),
        (status = 404, description = "Product not found", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<ApiResponse<ProductResponse>> {
    let product = state.services.products.get(id).await?;
    Ok(ApiResponse::ok("Product retrieved", product.into()))
}

/// PUT /api/products/{id} - Update own product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = PRODUCT_TAG,
    params(("id" = i32, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<ProductResponse>),
        (status = 403, description = "Not the owning brand", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn update_product(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateProductRequest>,
) -> AppResult<ApiResponse<ProductResponse>> {
    let product = state
        .services
        .products
        .update(id, auth_user.user_id, payload.into_update_product())
        .await?;
    Ok(ApiResponse::ok("Product updated", product.into()))
}

/// DELETE /api/products/{id} - Delete own product
///
/// Orders that referenced the product keep their amount and lose the link.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = PRODUCT_TAG,
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deleted", body = ApiResponse<NoData>),
        (status = 403, description = "Not the owning brand", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn delete_product(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> AppResult<ApiResponse<NoData>> {
    state.services.products.delete(id, auth_user.user_id).await?;
    Ok(ApiResponse::message("Product deleted"))
}
