pub mod auth;
pub mod logger;

pub use auth::{AuthUserInfo, TokenService, auth_middleware};
pub use logger::{REQUEST_ID_HEADER, TraceId, logger};
