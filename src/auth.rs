//! # Authentication
//!
//! Token issuance (HS256 JWT with fixed expiry), password hashing and the
//! bearer-token extractor protecting uploads and admin mutations.

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::error::{ApiError, unauthorized};

/// Claim set carried by issued tokens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// User id
    pub sub: i32,
    /// User email
    pub email: String,
    /// Username
    pub username: String,
    /// Issued-at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds)
    pub exp: i64,
}

/// Authenticated user extracted from a verified bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i32,
    pub email: String,
    pub username: String,
}

/// Issue a signed token for the given user, returning the token and its
/// lifetime in seconds.
pub fn issue_token(
    config: &AppConfig,
    user_id: i32,
    email: &str,
    username: &str,
) -> Result<(String, u64), ApiError> {
    let now = Utc::now().timestamp();
    let expires_in = config.jwt_expiry_seconds;
    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        username: username.to_string(),
        iat: now,
        exp: now + expires_in as i64,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret().as_bytes()),
    )
    .map_err(|err| {
        tracing::error!("Failed to sign token: {}", err);
        ApiError::new(
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_SERVER_ERROR",
            "Failed to issue token",
        )
    })?;

    Ok((token, expires_in))
}

/// Decode and verify a token's signature and expiry.
pub fn verify_token(config: &AppConfig, token: &str) -> Result<Claims, ApiError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret().as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|err| {
        tracing::debug!("Token verification failed: {}", err);
        unauthorized(Some("Invalid or expired token"))
    })
}

/// Hash a password with a per-hash random salt.
pub fn hash_password(config: &AppConfig, password: &str) -> Result<String, ApiError> {
    bcrypt::hash(password, config.bcrypt_cost).map_err(|err| {
        tracing::error!("Password hashing failed: {}", err);
        ApiError::new(
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_SERVER_ERROR",
            "Failed to process credentials",
        )
    })
}

/// Verify a password against a stored hash.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    bcrypt::verify(password, password_hash).unwrap_or(false)
}

fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    headers
        .get(AUTHORIZATION)
        .ok_or_else(|| unauthorized(Some("Missing Authorization header")))
        .and_then(|value| {
            value
                .to_str()
                .map_err(|_| unauthorized(Some("Invalid Authorization header")))
        })
        .and_then(|header| {
            header
                .strip_prefix("Bearer ")
                .ok_or_else(|| unauthorized(Some("Authorization header must use Bearer scheme")))
        })
}

impl<S> FromRequestParts<S> for AuthUser
where
    Arc<AppConfig>: FromRef<S>,
    S: Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = Arc::<AppConfig>::from_ref(state);
        let token = extract_bearer_token(&parts.headers)?;
        let claims = verify_token(&config, token)?;

        Ok(AuthUser {
            id: claims.sub,
            email: claims.email,
            username: claims.username,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AppConfig {
        AppConfig {
            profile: "test".to_string(),
            jwt_expiry_seconds: 3600,
            bcrypt_cost: 4,
            ..Default::default()
        }
    }

    #[test]
    fn issued_token_round_trips() {
        let config = test_config();
        let (token, expires_in) = issue_token(&config, 7, "a@b.example", "alto").unwrap();
        assert_eq!(expires_in, 3600);

        let claims = verify_token(&config, &token).unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.email, "a@b.example");
        assert_eq!(claims.username, "alto");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn tampered_token_is_rejected() {
        let config = test_config();
        let (token, _) = issue_token(&config, 7, "a@b.example", "alto").unwrap();

        let mut tampered = token.clone();
        tampered.pop();
        assert!(verify_token(&config, &tampered).is_err());

        let other = AppConfig {
            jwt_secret: Some("another-secret".to_string()),
            ..test_config()
        };
        assert!(verify_token(&other, &token).is_err());
    }

    #[test]
    fn password_hash_round_trips() {
        let config = test_config();
        let hash = hash_password(&config, "s1ngL0ud!").unwrap();
        assert_ne!(hash, "s1ngL0ud!");
        assert!(verify_password("s1ngL0ud!", &hash));
        assert!(!verify_password("wrong", &hash));
    }

    #[test]
    fn bearer_extraction_requires_scheme() {
        let mut headers = HeaderMap::new();
        assert!(extract_bearer_token(&headers).is_err());

        headers.insert(AUTHORIZATION, "Basic dXNlcjpwdw==".parse().unwrap());
        assert!(extract_bearer_token(&headers).is_err());

        headers.insert(AUTHORIZATION, "Bearer abc.def.ghi".parse().unwrap());
        assert_eq!(extract_bearer_token(&headers).unwrap(), "abc.def.ghi");
    }
}
