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
    db::enums::ProjectStatus,
    db::models::{
        api::ApiResponse,
        project::{ChangeStatusRequest, CreateProjectRequest, UpdateProjectRequest},
    },
    error::AppError,
    middleware::auth::AuthUserInfo,
    routes::with_conn,
    services::{ProjectsService, RequestContext},
    validation::ValidatedJson,
};

fn context(auth_info: &AuthUserInfo) -> RequestContext {
    RequestContext::new(auth_info.user.id)
}

pub async fn get_projects(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
) -> impl IntoResponse {
    let ctx = context(&auth_info);
    match with_conn(&state, move |conn| ProjectsService::list(conn, &ctx)).await {
        Ok(projects) => {
            let total = projects.len() as i64;
            let response =
                ApiResponse::success_with_count(projects, "Projects retrieved successfully", total);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn create_project(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    ValidatedJson(payload): ValidatedJson<CreateProjectRequest>,
) -> impl IntoResponse {
    let ctx = context(&auth_info);
    match with_conn(&state, move |conn| ProjectsService::create(conn, &ctx, &payload)).await {
        Ok(project) => {
            let response = ApiResponse::created(project, "Project created successfully");
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_project(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    Path(project_id): Path<Uuid>,
) -> impl IntoResponse {
    let ctx = context(&auth_info);
    match with_conn(&state, move |conn| ProjectsService::get(conn, &ctx, project_id)).await {
        Ok(project) => {
            let response = ApiResponse::success(project, "Project retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn update_project(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    Path(project_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateProjectRequest>,
) -> impl IntoResponse {
    let ctx = context(&auth_info);
    match with_conn(&state, move |conn| {
        ProjectsService::update(conn, &ctx, project_id, &payload)
    })
    .await
    {
        Ok(project) => {
            let response = ApiResponse::success(project, "Project updated successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn change_project_status(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    Path(project_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<ChangeStatusRequest>,
) -> impl IntoResponse {
    let ctx = context(&auth_info);
    match with_conn(&state, move |conn| {
        ProjectsService::change_status(conn, &ctx, project_id, payload.status)
    })
    .await
    {
        Ok(project) => {
            let response = ApiResponse::success(project, "Project status updated successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn delete_project(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    Path(project_id): Path<Uuid>,
) -> impl IntoResponse {
    let ctx = context(&auth_info);
    match with_conn(&state, move |conn| ProjectsService::delete(conn, &ctx, project_id)).await {
        Ok(()) => {
            let response = ApiResponse::<()>::ok("Project deleted successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_status_history(
    State(state): State<Arc<AppState>>,
    _auth_info: AuthUserInfo,
    Path(project_id): Path<Uuid>,
) -> impl IntoResponse {
    match with_conn(&state, move |conn| ProjectsService::status_history(conn, project_id)).await {
        Ok(history) => {
            let total = history.len() as i64;
            let response = ApiResponse::success_with_count(
                history,
                "Status history retrieved successfully",
                total,
            );
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_projects_by_user(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    Path(user_id): Path<Uuid>,
) -> impl IntoResponse {
    let ctx = context(&auth_info);
    match with_conn(&state, move |conn| ProjectsService::list_by_owner(conn, &ctx, user_id)).await {
        Ok(projects) => {
            let total = projects.len() as i64;
            let response =
                ApiResponse::success_with_count(projects, "Projects retrieved successfully", total);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_projects_by_status(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    Path(status): Path<String>,
) -> impl IntoResponse {
    let status = match status.to_ascii_uppercase().parse::<ProjectStatus>() {
        Ok(status) => status,
        Err(message) => return AppError::validation(message).into_response(),
    };

    let ctx = context(&auth_info);
    match with_conn(&state, move |conn| ProjectsService::list_by_status(conn, &ctx, status)).await {
        Ok(projects) => {
            let total = projects.len() as i64;
            let response =
                ApiResponse::success_with_count(projects, "Projects retrieved successfully", total);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_upcoming_deadlines(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
) -> impl IntoResponse {
    let ctx = context(&auth_info);
    match with_conn(&state, move |conn| ProjectsService::upcoming_deadlines(conn, &ctx)).await {
        Ok(projects) => {
            let total = projects.len() as i64;
            let response = ApiResponse::success_with_count(
                projects,
                "Upcoming deadlines retrieved successfully",
                total,
            );
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_overdue_projects(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
) -> impl IntoResponse {
    let ctx = context(&auth_info);
    match with_conn(&state, move |conn| ProjectsService::overdue(conn, &ctx)).await {
        Ok(projects) => {
            let total = projects.len() as i64;
            let response = ApiResponse::success_with_count(
                projects,
                "Overdue projects retrieved successfully",
                total,
            );
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}
