//! Shared application state handed to every Axum handler.

use crate::config::{JwtConfig, PaginationConfig, Settings};
use crate::db::AsyncDbPool;
use crate::repositories::Repositories;
use crate::services::Services;

/// Cloning is cheap: services hold repositories that share the pool, and
/// the pool itself is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    /// Used directly by the health checks.
    pub db_pool: AsyncDbPool,
    pub jwt_config: JwtConfig,
    pub pagination: PaginationConfig,
}

impl AppState {
    /// Wires repositories and services on top of `pool`.
    pub fn new(pool: AsyncDbPool, settings: &Settings) -> Self {
        let repos = Repositories::new(pool.clone());
        let services = Services::new(repos, settings.jwt.clone(), settings.rewards);

        Self {
            services,
            db_pool: pool,
            jwt_config: settings.jwt.clone(),
            pagination: settings.pagination,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::time::Duration;

    use diesel_async::AsyncPgConnection;
    use diesel_async::pooled_connection::AsyncDieselConnectionManager;
    use diesel_async::pooled_connection::bb8::Pool;

    use super::AppState;
    use crate::config::Settings;

    pub const TEST_SECRET: &str = "test-secret-key-that-is-long-enough-32";

    /// State over a pool that never connects until a handler asks for a
    /// connection. Requests that stop in middleware never touch it.
    pub fn lazy_state() -> AppState {
        let mut settings = Settings::default();
        settings.jwt.secret = TEST_SECRET.to_string();

        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(
            "postgres://localhost:1/creatorhub_test",
        );
        let pool = Pool::builder()
            .max_size(1)
            .connection_timeout(Duration::from_millis(200))
            .build_unchecked(manager);

        AppState::new(pool, &settings)
    }
}
