pub mod auth;
pub mod dashboard;
pub mod health;
pub mod projects;
pub mod users;

use crate::{AppState, error::AppError, middleware::auth::auth_middleware};
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post, put},
};
use diesel::PgConnection;
use std::sync::Arc;
use tokio::task;

/// Routes that need no bearer token.
pub fn public_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
        .with_state(state)
}

/// Routes behind [`auth_middleware`].
pub fn protected_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/users/me", get(users::get_current_user))
        .route("/users/:user_id", get(users::get_user))
        .route(
            "/projects",
            get(projects::get_projects).post(projects::create_project),
        )
        .route(
            "/projects/:project_id",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        )
        .route(
            "/projects/:project_id/status",
            put(projects::change_project_status),
        )
        .route(
            "/projects/:project_id/status-history",
            get(projects::get_status_history),
        )
        .route("/projects/user/:user_id", get(projects::get_projects_by_user))
        .route(
            "/projects/status/:status",
            get(projects::get_projects_by_status),
        )
        .route(
            "/projects/deadlines/upcoming",
            get(projects::get_upcoming_deadlines),
        )
        .route(
            "/projects/deadlines/overdue",
            get(projects::get_overdue_projects),
        )
        .route("/dashboard/stats", get(dashboard::get_stats))
        .route(
            "/dashboard/user-summary/:user_id",
            get(dashboard::get_user_summary),
        )
        .layer(from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}

pub fn create_router(state: Arc<AppState>) -> Router {
    public_router(state.clone()).merge(protected_router(state))
}

/// Runs blocking diesel and bcrypt work off the async executor with a pooled
/// connection.
pub(crate) async fn with_conn<T, F>(state: &AppState, work: F) -> Result<T, AppError>
where
    F: FnOnce(&mut PgConnection) -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    let pool = state.db.clone();
    task::spawn_blocking(move || {
        let mut conn = pool.get()?;
        work(&mut conn)
    })
    .await
    .map_err(|e| AppError::internal(format!("Blocking task failed: {}", e)))?
}
