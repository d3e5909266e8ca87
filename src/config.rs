use crate::error::{AppError, AppResult};
use serde::Deserialize;

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    pub database_url: String,
    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub database_min_connections: u32,
    #[serde(default = "default_connection_timeout")]
    pub database_connection_timeout: u64,

    #[serde(default = "default_host")]
    pub server_host: String,
    #[serde(default = "default_port")]
    pub server_port: u16,
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    #[serde(default = "default_access_token_expires")]
    pub jwt_access_token_expires_in: u64,
    #[serde(default = "default_refresh_token_expires")]
    pub jwt_refresh_token_expires_in: u64,

    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_format")]
    pub log_format: String,

    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,

    #[serde(default)]
    pub seed_default_data: bool,
    /// Password for the seeded default user. Required when seeding is on.
    #[serde(default)]
    pub seed_user_password: Option<String>,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub access_token_expires_in: u64,
    pub refresh_token_expires_in: u64,
    pub bcrypt_cost: u32,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

// Default value functions
fn default_max_connections() -> u32 {
    20
}
fn default_min_connections() -> u32 {
    5
}
fn default_connection_timeout() -> u64 {
    30
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8000
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}
fn default_jwt_secret() -> String {
    PLACEHOLDER_JWT_SECRET.to_string()
}
fn default_access_token_expires() -> u64 {
    3600
} // 1 hour
fn default_refresh_token_expires() -> u64 {
    604800
} // 7 days
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}
fn default_bcrypt_cost() -> u32 {
    4
} // use 12+ in production

const PLACEHOLDER_JWT_SECRET: &str = "your-secret-key";

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let config = envy::from_env::<Config>()
            .map_err(|e| AppError::Config(format!("Failed to load config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.database_max_connections == 0 {
            return Err(AppError::Config(
                "DATABASE_MAX_CONNECTIONS must be > 0".to_string(),
            ));
        }

        if self.database_min_connections > self.database_max_connections {
            return Err(AppError::Config(
                "DATABASE_MIN_CONNECTIONS cannot be greater than DATABASE_MAX_CONNECTIONS"
                    .to_string(),
            ));
        }

        if self.jwt_secret == PLACEHOLDER_JWT_SECRET {
            return Err(AppError::Config(
                "JWT_SECRET must be set to a secure value".to_string(),
            ));
        }

        if self.jwt_access_token_expires_in == 0 {
            return Err(AppError::Config(
                "JWT_ACCESS_TOKEN_EXPIRES_IN must be > 0".to_string(),
            ));
        }

        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(AppError::Config(
                "BCRYPT_COST must be between 4 and 31".to_string(),
            ));
        }

        if self.seed_default_data && self.seed_password().is_none() {
            return Err(AppError::Config(
                "SEED_USER_PASSWORD must be set when SEED_DEFAULT_DATA is enabled".to_string(),
            ));
        }

        Ok(())
    }

    /// The seed password, ignoring a blank value.
    pub fn seed_password(&self) -> Option<&str> {
        self.seed_user_password
            .as_deref()
            .filter(|password| !password.trim().is_empty())
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn database(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database_url.clone(),
            max_connections: self.database_max_connections,
            min_connections: self.database_min_connections,
            connection_timeout: self.database_connection_timeout,
        }
    }

    pub fn server(&self) -> ServerConfig {
        ServerConfig {
            host: self.server_host.clone(),
            port: self.server_port,
            cors_origins: self.cors_origins.clone(),
        }
    }

    pub fn auth(&self) -> AuthConfig {
        AuthConfig {
            jwt_secret: self.jwt_secret.clone(),
            access_token_expires_in: self.jwt_access_token_expires_in,
            refresh_token_expires_in: self.jwt_refresh_token_expires_in,
            bcrypt_cost: self.bcrypt_cost,
        }
    }

    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.log_level.clone(),
            format: self.log_format.clone(),
        }
    }
}
