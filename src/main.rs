use axum::{Server, http::HeaderValue, middleware::from_fn};
use diesel::{
    PgConnection,
    r2d2::{self, ConnectionManager as DbConnectionManager},
};
use research_tracker::{
    AppState, config::Config, db::DbPool, middleware::logger::logger, routes,
    services::SeedService,
};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower_http::cors::{Any, CorsLayer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    research_tracker::init_tracing(&config);

    // Initialize database
    let database = config.database();
    let manager = DbConnectionManager::<PgConnection>::new(&database.url);
    let db: DbPool = r2d2::Pool::builder()
        .max_size(database.max_connections)
        .min_idle(Some(database.min_connections))
        .connection_timeout(Duration::from_secs(database.connection_timeout))
        .build(manager)?;
    tracing::info!(
        max_connections = database.max_connections,
        "Database connection pool ready"
    );

    if let Some(password) = config.seed_default_data.then(|| config.seed_password()).flatten() {
        let mut conn = db.get()?;
        SeedService::seed_defaults(&mut conn, password, config.bcrypt_cost)?;
    }

    let cors = cors_layer(&config.server().cors_origins);
    let addr: SocketAddr = config.server_address().parse()?;

    // Application state
    let state = Arc::new(AppState::new(db, config));

    let app = routes::create_router(state).layer(cors).layer(from_fn(logger));

    tracing::info!(%addr, "Server listening");
    Server::bind(&addr).serve(app.into_make_service()).await?;
    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(allowed)
}
