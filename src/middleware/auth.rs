use crate::AppState;
use crate::config::AuthConfig;
use crate::db::models::{ApiResponse, AuthUser};
use crate::db::repositories::UsersRepo;
use crate::error::AppError;
use axum::{
    Json,
    extract::{FromRequestParts, State},
    http::{Request, StatusCode, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use headers::{Authorization, HeaderMapExt, authorization::Bearer};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid, // user_id
    pub username: String,
    pub exp: u64,    // expiration time
    pub iat: u64,    // issued at
    pub jti: String, // JWT ID
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: Uuid, // user_id
    pub exp: u64,
    pub iat: u64,
    pub jti: String,
    pub token_use: String,
}

const REFRESH_TOKEN_USE: &str = "refresh";

/// Issues and verifies HS256 access and refresh tokens.
#[derive(Clone)]
pub struct TokenService {
    secret: Arc<str>,
    access_token_expires_in: u64,
    refresh_token_expires_in: u64,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            secret: Arc::from(config.jwt_secret.as_str()),
            access_token_expires_in: config.access_token_expires_in,
            refresh_token_expires_in: config.refresh_token_expires_in,
        }
    }

    pub fn access_token_expires_in(&self) -> u64 {
        self.access_token_expires_in
    }

    pub fn generate_access_token(
        &self,
        user: &AuthUser,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = now_secs();
        let claims = Claims {
            sub: user.id,
            username: user.username.clone(),
            exp: now + self.access_token_expires_in,
            iat: now,
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
    }

    pub fn generate_refresh_token(
        &self,
        user_id: Uuid,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = now_secs();
        let claims = RefreshClaims {
            sub: user_id,
            exp: now + self.refresh_token_expires_in,
            iat: now,
            jti: Uuid::new_v4().to_string(),
            token_use: REFRESH_TOKEN_USE.to_string(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    pub fn verify_refresh_token(&self, token: &str) -> Result<RefreshClaims, AppError> {
        let token_data = decode::<RefreshClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;

        if token_data.claims.token_use != REFRESH_TOKEN_USE {
            return Err(AppError::auth("Not a refresh token"));
        }
        Ok(token_data.claims)
    }
}

fn now_secs() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp()).unwrap_or_default()
}

/// The authenticated caller, placed in request extensions by [`auth_middleware`].
#[derive(Clone, Debug)]
pub struct AuthUserInfo {
    pub user: AuthUser,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUserInfo
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthUserInfo>().cloned().ok_or_else(|| {
            let response = ApiResponse::<()>::unauthorized("Unauthorized");
            (StatusCode::UNAUTHORIZED, Json(response)).into_response()
        })
    }
}

fn bearer_token<B>(request: &Request<B>) -> Option<String> {
    request
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().to_string())
}

pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<axum::body::Body>,
    next: Next<axum::body::Body>,
) -> Result<Response, AppError> {
    let token = bearer_token(&request).ok_or_else(|| AppError::auth("Missing bearer token"))?;

    let claims = state.tokens.verify_token(&token)?;

    let mut conn = state.db.get()?;
    let user = UsersRepo::find_by_id(&mut conn, claims.sub)?.ok_or_else(|| {
        tracing::debug!(user_id = %claims.sub, "Token subject no longer exists");
        AppError::auth("User not found")
    })?;
    drop(conn);

    request.extensions_mut().insert(AuthUserInfo {
        user: AuthUser::from(&user),
    });

    Ok(next.run(request).await)
}
