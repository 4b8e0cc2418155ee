//! Configuration for the customer API server.
//!
//! All configuration is loaded from environment variables.
//! The signing secret is required and is never logged.

use std::time::Duration;

/// Minimum HS256 signing key length in bytes (256 bits).
pub const MIN_SECRET_LEN: usize = 32;

/// Default clock skew tolerated when checking `exp` / `nbf` (5 minutes).
pub const DEFAULT_LEEWAY_SECS: u64 = 300;

/// Server configuration
#[derive(Clone)]
pub struct Config {
    /// Server bind address
    pub bind_addr: String,

    /// Server port
    pub port: u16,

    // === Token Validation ===
    /// Symmetric key used to verify token signatures
    pub jwt_secret: String,

    /// Expected `iss` claim
    pub jwt_issuer: String,

    /// Expected `aud` claim
    pub jwt_audience: String,

    /// Clock skew tolerance for lifetime checks
    pub jwt_leeway: Duration,

    // === Surface ===
    /// Serve the OpenAPI document and Swagger UI
    pub docs_enabled: bool,

    /// Also mount the singular `PUT /customer/{id}` route
    pub legacy_routes: bool,
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("JWT_SECRET is not set")]
    MissingSecret,

    #[error("JWT_SECRET must be at least {min} bytes, got {0}", min = MIN_SECRET_LEN)]
    SecretTooShort(usize),

    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

impl Config {
    /// Build a configuration with default surface settings.
    pub fn new(
        jwt_secret: impl Into<String>,
        jwt_issuer: impl Into<String>,
        jwt_audience: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let jwt_secret = jwt_secret.into();
        validate_secret(&jwt_secret)?;

        Ok(Self {
            bind_addr: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret,
            jwt_issuer: jwt_issuer.into(),
            jwt_audience: jwt_audience.into(),
            jwt_leeway: Duration::from_secs(DEFAULT_LEEWAY_SECS),
            docs_enabled: true,
            legacy_routes: false,
        })
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = std::env::var("JWT_SECRET").map_err(|_| ConfigError::MissingSecret)?;
        validate_secret(&jwt_secret)?;

        Ok(Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_var("PORT")?.unwrap_or(8080),

            jwt_secret,
            jwt_issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "your-issuer".to_string()),
            jwt_audience: std::env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "your-audience".to_string()),
            jwt_leeway: Duration::from_secs(
                parse_var("JWT_LEEWAY_SECS")?.unwrap_or(DEFAULT_LEEWAY_SECS),
            ),

            docs_enabled: flag_var("DOCS_ENABLED").unwrap_or(true),
            legacy_routes: flag_var("LEGACY_ROUTES").unwrap_or(false),
        })
    }
}

// Hand-written so the secret never ends up in a log line.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("bind_addr", &self.bind_addr)
            .field("port", &self.port)
            .field("jwt_secret", &"<redacted>")
            .field("jwt_issuer", &self.jwt_issuer)
            .field("jwt_audience", &self.jwt_audience)
            .field("jwt_leeway", &self.jwt_leeway)
            .field("docs_enabled", &self.docs_enabled)
            .field("legacy_routes", &self.legacy_routes)
            .finish()
    }
}

fn validate_secret(secret: &str) -> Result<(), ConfigError> {
    if secret.len() < MIN_SECRET_LEN {
        return Err(ConfigError::SecretTooShort(secret.len()));
    }
    Ok(())
}

fn parse_var<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        Err(_) => Ok(None),
    }
}

fn flag_var(name: &str) -> Option<bool> {
    std::env::var(name)
        .ok()
        .map(|v| v == "true" || v == "1")
}
