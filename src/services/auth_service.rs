use bcrypt::{hash, verify};
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::models::api::error_codes,
    db::models::user::{
        AuthUser, LoginRequest, LoginResponse, NewUser, RefreshTokenResponse, RegisterRequest,
        User,
    },
    db::repositories::UsersRepo,
    error::AppError,
    middleware::auth::TokenService,
    validation::auth::{validate_login_request, validate_register_request},
};

const TOKEN_TYPE: &str = "Bearer";

pub struct AuthService;

impl AuthService {
    pub fn register(
        conn: &mut PgConnection,
        req: &RegisterRequest,
        bcrypt_cost: u32,
    ) -> Result<User, AppError> {
        validate_register_request(&req.username, &req.password)?;

        if UsersRepo::exists_by_username(conn, &req.username)? {
            return Err(AppError::conflict_with_code(
                "Username already exists",
                Some("username".to_string()),
                error_codes::USER_USERNAME_EXISTS,
            ));
        }

        if let Some(email) = req.email.as_deref() {
            if UsersRepo::exists_by_email(conn, email)? {
                return Err(AppError::conflict_with_code(
                    "Email already exists",
                    Some("email".to_string()),
                    error_codes::USER_EMAIL_EXISTS,
                ));
            }
        }

        let password_hash = hash(&req.password, bcrypt_cost)?;

        let new_user = NewUser {
            id: Uuid::new_v4(),
            username: req.username.clone(),
            email: req.email.clone(),
            password_hash,
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
            department: req.department.clone(),
            institution: req.institution.clone(),
        };

        let user = UsersRepo::insert(conn, &new_user).map_err(|e| match e {
            // Lost a race with another registration of the same name.
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                _,
            ) => AppError::conflict_with_code(
                "Username or email already exists",
                None,
                error_codes::USER_USERNAME_EXISTS,
            ),
            other => AppError::from(other),
        })?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    pub fn login(
        conn: &mut PgConnection,
        tokens: &TokenService,
        req: &LoginRequest,
    ) -> Result<LoginResponse, AppError> {
        validate_login_request(&req.username, &req.password)?;

        let user = UsersRepo::find_by_username(conn, &req.username)?
            .ok_or_else(|| AppError::auth("Invalid username or password"))?;

        if !verify(&req.password, &user.password_hash)? {
            tracing::info!(username = %req.username, "Failed login attempt");
            return Err(AppError::auth("Invalid username or password"));
        }

        let access_token = tokens.generate_access_token(&AuthUser::from(&user))?;
        let refresh_token = tokens.generate_refresh_token(user.id)?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(LoginResponse {
            access_token,
            refresh_token,
            token_type: TOKEN_TYPE.to_string(),
            expires_in: tokens.access_token_expires_in(),
            user,
        })
    }

    pub fn refresh(
        conn: &mut PgConnection,
        tokens: &TokenService,
        refresh_token: &str,
    ) -> Result<RefreshTokenResponse, AppError> {
        let claims = tokens.verify_refresh_token(refresh_token)?;

        let user = UsersRepo::find_by_id(conn, claims.sub)?
            .ok_or_else(|| AppError::auth("User not found"))?;

        Ok(RefreshTokenResponse {
            access_token: tokens.generate_access_token(&AuthUser::from(&user))?,
            token_type: TOKEN_TYPE.to_string(),
            expires_in: tokens.access_token_expires_in(),
        })
    }

    pub fn get_user(conn: &mut PgConnection, user_id: Uuid) -> Result<User, AppError> {
        UsersRepo::find_by_id(conn, user_id)?.ok_or_else(|| AppError::not_found("user"))
    }
}
