use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    AppState, db::models::ApiResponse, middleware::auth::AuthUserInfo, routes::with_conn,
    services::AuthService,
};

pub async fn get_current_user(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
) -> impl IntoResponse {
    let user_id = auth_info.user.id;
    match with_conn(&state, move |conn| AuthService::get_user(conn, user_id)).await {
        Ok(user) => {
            let response = ApiResponse::success(user, "User retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    _auth_info: AuthUserInfo,
    Path(user_id): Path<Uuid>,
) -> impl IntoResponse {
    match with_conn(&state, move |conn| AuthService::get_user(conn, user_id)).await {
        Ok(user) => {
            let response = ApiResponse::success(user, "User retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}
