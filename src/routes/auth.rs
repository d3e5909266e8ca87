use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

use crate::{
    AppState,
    db::models::{
        api::ApiResponse,
        user::{LoginRequest, RefreshTokenRequest, RegisterRequest},
    },
    routes::with_conn,
    services::AuthService,
    validation::ValidatedJson,
};

pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> impl IntoResponse {
    let bcrypt_cost = state.config.bcrypt_cost;
    match with_conn(&state, move |conn| AuthService::register(conn, &payload, bcrypt_cost)).await {
        Ok(user) => {
            let response = ApiResponse::created(user, "User registered successfully");
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> impl IntoResponse {
    let tokens = state.tokens.clone();
    match with_conn(&state, move |conn| AuthService::login(conn, &tokens, &payload)).await {
        Ok(login) => {
            let response = ApiResponse::success(login, "Login successful");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn refresh_token(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<RefreshTokenRequest>,
) -> impl IntoResponse {
    let tokens = state.tokens.clone();
    match with_conn(&state, move |conn| {
        AuthService::refresh(conn, &tokens, &payload.refresh_token)
    })
    .await
    {
        Ok(refreshed) => {
            let response = ApiResponse::success(refreshed, "Token refreshed successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}
