use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::db::models::ApiResponse;

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health_check() -> impl IntoResponse {
    let body = HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    };
    (StatusCode::OK, Json(ApiResponse::success(body, "Service is healthy")))
}
