use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    AppState,
    db::models::ApiResponse,
    middleware::auth::AuthUserInfo,
    routes::with_conn,
    services::{DashboardService, RequestContext},
};

pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
) -> impl IntoResponse {
    let ctx = RequestContext::new(auth_info.user.id);
    match with_conn(&state, move |conn| DashboardService::stats(conn, &ctx)).await {
        Ok(stats) => {
            let response = ApiResponse::success(stats, "Dashboard stats retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_user_summary(
    State(state): State<Arc<AppState>>,
    _auth_info: AuthUserInfo,
    Path(user_id): Path<Uuid>,
) -> impl IntoResponse {
    match with_conn(&state, move |conn| DashboardService::user_summary(conn, user_id)).await {
        Ok(summary) => {
            let response = ApiResponse::success(summary, "User summary retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}
