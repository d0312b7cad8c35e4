use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

pub const AUTH_TAG: &str = "Auth";
pub const ME_TAG: &str = "Me";
pub const USER_TAG: &str = "Users";
pub const GROUP_TAG: &str = "Groups";
pub const PRODUCT_TAG: &str = "Products";
pub const ORDER_TAG: &str = "Orders";
pub const RATING_TAG: &str = "Ratings";
pub const NOTIFICATION_TAG: &str = "Notifications";
pub const WORK_POST_TAG: &str = "Work posts";
pub const DASHBOARD_TAG: &str = "Dashboard";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "CreatorHub",
        description = "Marketplace API connecting brands with content creators",
    ),
    modifiers(&SecurityAddon),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::api::dto::NoData,
            crate::error::ValidationFieldError,
        )
    ),
    tags(
        (name = AUTH_TAG, description = "Registration, login and token refresh"),
        (name = ME_TAG, description = "The caller's profile, coins, referrals and applications"),
        (name = USER_TAG, description = "User directory, public profiles and received ratings"),
        (name = GROUP_TAG, description = "Owner-curated groups of users"),
        (name = PRODUCT_TAG, description = "Brand products"),
        (name = ORDER_TAG, description = "Orders between brands and creators"),
        (name = RATING_TAG, description = "Ratings on completed orders"),
        (name = NOTIFICATION_TAG, description = "In-app notifications"),
        (name = WORK_POST_TAG, description = "Work posts, matching and applications"),
        (name = DASHBOARD_TAG, description = "Per-user dashboard"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token from /api/auth/login"))
                        .build(),
                ),
            )
        }
    }
}
