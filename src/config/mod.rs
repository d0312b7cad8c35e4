//! Configuration management
//!
//! Layered configuration loading, lowest to highest priority:
//! 1. `default.toml`
//! 2. `{environment}.toml`
//! 3. `local.toml` (not committed)
//! 4. `CREATORHUB_*` environment variables

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{
    DatabaseConfig, JwtConfig, LoggerSettings, PaginationConfig, RewardsConfig, ServerConfig,
    Settings,
};
