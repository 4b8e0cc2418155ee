//! Bearer token authentication for the customer API.
//!
//! Every customer route sits behind [`require_bearer`]. Tokens are JWTs
//! signed with a shared HS256 secret; issuer, audience and lifetime must
//! match the configured values.
//!
//! # Token Validation
//!
//! - Signature must verify against the configured secret (HS256 only)
//! - `iss` and `aud` must equal the configured issuer and audience
//! - `exp` is required; `exp` and `nbf` are checked with a clock-skew leeway
//!
//! Verification sits behind the [`TokenVerifier`] trait so handlers never see
//! key material and tests can substitute their own verifier.

use axum::{
    extract::{Request, State},
    http::{
        header::{AUTHORIZATION, WWW_AUTHENTICATE},
        HeaderValue, StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use jsonwebtoken::{errors::ErrorKind, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::Config;
use crate::models::ErrorResponse;

/// Claims carried by an accepted token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (caller identity), if the issuer sets one
    #[serde(default)]
    pub sub: Option<String>,
    /// Token issuer
    pub iss: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    #[serde(default)]
    pub iat: Option<i64>,
}

/// Verifies a raw bearer token and returns its claims.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<Claims, AuthError>;
}

/// HS256 JWT verifier
#[derive(Clone)]
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(secret: &[u8], issuer: &str, audience: &str, leeway: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = leeway.as_secs();

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.jwt_secret.as_bytes(),
            &config.jwt_issuer,
            &config.jwt_audience,
            config.jwt_leeway,
        )
    }
}

impl TokenVerifier for JwtVerifier {
    fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => {
                    debug!(error = %e, "Token rejected");
                    AuthError::InvalidToken
                }
            })?;

        Ok(data.claims)
    }
}

/// Shared verifier handle stored in router state
pub type SharedVerifier = Arc<dyn TokenVerifier>;

/// Authorization error
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Missing Authorization header
    #[error("authorization header required")]
    MissingHeader,
    /// Authorization header is not a bearer credential
    #[error("invalid authorization header format")]
    InvalidHeader,
    /// Signature, issuer, audience or structure check failed
    #[error("invalid token")]
    InvalidToken,
    /// Token lifetime has ended
    #[error("token expired")]
    Expired,
}

impl AuthError {
    fn code(self) -> &'static str {
        match self {
            AuthError::MissingHeader => "MISSING_AUTH",
            AuthError::InvalidHeader => "INVALID_AUTH",
            AuthError::InvalidToken => "UNAUTHORIZED",
            AuthError::Expired => "TOKEN_EXPIRED",
        }
    }

    fn challenge(self) -> &'static str {
        match self {
            AuthError::MissingHeader | AuthError::InvalidHeader => "Bearer",
            AuthError::InvalidToken => "Bearer error=\"invalid_token\"",
            AuthError::Expired => {
                "Bearer error=\"invalid_token\", error_description=\"The token expired\""
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: self.code(),
        });

        (
            StatusCode::UNAUTHORIZED,
            [(WWW_AUTHENTICATE, HeaderValue::from_static(self.challenge()))],
            body,
        )
            .into_response()
    }
}

/// Extract Bearer token from Authorization header
pub fn extract_bearer_token(authorization: &str) -> Option<&str> {
    authorization
        .strip_prefix("Bearer ")
        .or_else(|| authorization.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Middleware rejecting any request without a valid bearer token.
///
/// Accepted claims are placed in the request extensions.
pub async fn require_bearer(
    State(verifier): State<SharedVerifier>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidHeader)?;

    let token = extract_bearer_token(header).ok_or(AuthError::InvalidHeader)?;

    let claims = verifier.verify(token).map_err(|e| {
        warn!(
            reason = e.code(),
            method = %req.method(),
            path = %req.uri().path(),
            "Bearer authentication failed"
        );
        e
    })?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
