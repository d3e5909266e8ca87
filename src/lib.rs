pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod schema;
pub mod services;
pub mod tracking;
pub mod validation;

use crate::config::Config;
use crate::db::DbPool;
use crate::middleware::auth::TokenService;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Arc<Config>,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(db: DbPool, config: Config) -> Self {
        let tokens = TokenService::new(&config.auth());
        Self {
            db,
            config: Arc::new(config),
            tokens,
        }
    }
}

/// Installs the global subscriber. `RUST_LOG` takes precedence over the
/// configured level.
pub fn init_tracing(config: &Config) {
    let logging = config.logging();
    let level_filter = match logging.level.as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "info" => "info",
        "warn" => "warn",
        "error" => "error",
        _ => "info",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_filter));

    match logging.format.as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .init();
        }
        _ => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
    }
}
