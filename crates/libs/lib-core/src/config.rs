//! # Application Configuration
//!
//! This module manages application configuration loaded from environment variables.
//! All configuration is validated on startup to fail fast if misconfigured.
//!
//! ## Global Config Access
//!
//! [`init_config()`] loads the configuration once and stores it in a process-wide
//! [`OnceLock`]. The returned reference is cloned into the web layer's state so
//! handlers never reach for globals:
//!
//! ```rust,no_run
//! use lib_core::config::init_config;
//!
//! let config = init_config().expect("valid configuration").clone();
//! println!("listening on port {}", config.port);
//! ```

use crate::error::{AppError, Result};
use lib_auth::{DEFAULT_BCRYPT_COST, MAX_BCRYPT_COST, MIN_BCRYPT_COST};
use lib_utils::envs::{get_env, get_env_opt, get_env_or};
use std::fmt;
use std::sync::OnceLock;
use std::time::Duration;

/// Shortest accepted HS256 secret.
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// Application configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    /// Full connection URL; takes precedence over the `database_*` parts.
    pub database_url: Option<String>,
    pub database_host: String,
    pub database_user: String,
    pub database_password: String,
    pub database_name: String,

    /// Port the HTTP server binds on all interfaces
    pub port: u16,

    /// Secret key for JWT token signing and verification
    ///
    /// **Must be at least 32 characters long.**
    pub jwt_secret: String,

    /// JWT token validity period in hours
    ///
    /// Every login uses this single value. Valid range: 1-720.
    pub jwt_expiration_hours: i64,

    /// bcrypt work factor (4-31), default `bcrypt::DEFAULT_COST`
    pub bcrypt_cost: u32,

    /// Upper bound for a single store call
    pub request_timeout_secs: u64,

    /// Allowed CORS origins; `["*"]` allows any origin
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let database_url = get_env_opt("DATABASE_URL");

        // The individual parts are only mandatory without a full URL
        let db_part = |name: &'static str| -> Result<String> {
            match &database_url {
                Some(_) => Ok(get_env_opt(name).unwrap_or_default()),
                None => get_env(name).map_err(config_err),
            }
        };

        let database_host = db_part("DATABASE_HOST")?;
        let database_user = db_part("DATABASE_USER")?;
        let database_name = db_part("DATABASE_NAME")?;
        let database_password = get_env_opt("DATABASE_PASSWORD").unwrap_or_default();

        let jwt_secret = get_env("JWT_SECRET").map_err(config_err)?;

        let allowed_origins = get_env_opt("CORS_ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_else(|| vec!["*".to_string()]);

        Ok(Self {
            database_url,
            database_host,
            database_user,
            database_password,
            database_name,
            port: get_env_or("PORT", 8080).map_err(config_err)?,
            jwt_secret,
            jwt_expiration_hours: get_env_or("JWT_EXPIRATION_HOURS", 72).map_err(config_err)?,
            bcrypt_cost: get_env_or("BCRYPT_COST", DEFAULT_BCRYPT_COST).map_err(config_err)?,
            request_timeout_secs: get_env_or("REQUEST_TIMEOUT_SECS", 5).map_err(config_err)?,
            allowed_origins,
        })
    }

    /// Validate configuration values against security and business rules.
    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(AppError::Config(format!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LEN
            )));
        }

        if !(1..=720).contains(&self.jwt_expiration_hours) {
            return Err(AppError::Config(
                "JWT_EXPIRATION_HOURS must be between 1 and 720 (30 days)".to_string(),
            ));
        }

        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.bcrypt_cost) {
            return Err(AppError::Config(format!(
                "BCRYPT_COST must be between {} and {}",
                MIN_BCRYPT_COST, MAX_BCRYPT_COST
            )));
        }

        if !(1..=60).contains(&self.request_timeout_secs) {
            return Err(AppError::Config(
                "REQUEST_TIMEOUT_SECS must be between 1 and 60".to_string(),
            ));
        }

        if self.allowed_origins.is_empty() {
            return Err(AppError::Config(
                "CORS_ALLOWED_ORIGINS must list at least one origin".to_string(),
            ));
        }

        Ok(())
    }

    /// Connection URL for the store: `DATABASE_URL` as given, otherwise a MySQL
    /// URL assembled from the `DATABASE_*` parts.
    ///
    /// User and password are percent-encoded, so reserved characters such as
    /// `@`, `/` or `#` survive the round-trip through the URL parser.
    pub fn database_url(&self) -> String {
        if let Some(url) = &self.database_url {
            return url.clone();
        }

        let user = urlencoding::encode(&self.database_user);
        if self.database_password.is_empty() {
            format!("mysql://{}@{}/{}", user, self.database_host, self.database_name)
        } else {
            format!(
                "mysql://{}:{}@{}/{}",
                user,
                urlencoding::encode(&self.database_password),
                self.database_host,
                self.database_name
            )
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

// Secrets stay out of logs
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &self.database_url.as_ref().map(|_| "***REDACTED***"))
            .field("database_host", &self.database_host)
            .field("database_user", &self.database_user)
            .field("database_password", &"***REDACTED***")
            .field("database_name", &self.database_name)
            .field("port", &self.port)
            .field("jwt_secret", &"***REDACTED***")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("allowed_origins", &self.allowed_origins)
            .finish()
    }
}

fn config_err(e: lib_utils::envs::Error) -> AppError {
    AppError::Config(e.to_string())
}

/// Global configuration instance (initialized once at startup).
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Load, validate and publish the global configuration.
///
/// # Errors
///
/// Returns an error if:
/// - Environment variables are missing or invalid
/// - Configuration validation fails
/// - Config has already been initialized
pub fn init_config() -> Result<&'static Config> {
    let config = Config::from_env()?;
    config.validate()?;

    CONFIG
        .set(config)
        .map_err(|_| AppError::Config("Config has already been initialized".to_string()))?;

    core_config()
}

/// Get a reference to the global configuration.
///
/// Fails with `AppError::Config` if [`init_config()`] has not run yet.
pub fn core_config() -> Result<&'static Config> {
    CONFIG.get().ok_or_else(|| {
        AppError::Config("Config must be initialized with init_config() before use".to_string())
    })
}
