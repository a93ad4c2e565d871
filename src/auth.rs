// ABOUTME: Bearer JWT verification against the identity provider's shared secret
// ABOUTME: Also mints development tokens for locally mirrored users
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Authentication
//!
//! Credentials are issued by an external identity provider as HS256 JWTs
//! whose `sub` claim is the local user id. This module only verifies them.
//! [`AuthManager::generate_token`] exists for `foodapi-cli token issue` and
//! for tests.

use std::fmt::{self, Display, Formatter};

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{AppError, AppResult};
use crate::models::User;

/// Convert a duration to a human-readable format
fn humanize_duration(duration: Duration) -> String {
    let total_secs = duration.num_seconds().abs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;

    if hours > 0 {
        format!("{hours} hours")
    } else if minutes > 0 {
        format!("{minutes} minutes")
    } else {
        format!("{total_secs} seconds")
    }
}

/// `JWT` validation error with detailed information
#[derive(Debug, Clone)]
pub enum JwtValidationError {
    /// Token has expired
    TokenExpired {
        /// When the token expired
        expired_at: DateTime<Utc>,
        /// Current time for reference
        current_time: DateTime<Utc>,
    },
    /// Token signature or claims are invalid
    TokenInvalid {
        /// Reason for invalidity
        reason: String,
    },
    /// Token is malformed (not proper `JWT` format)
    TokenMalformed {
        /// Details about malformation
        details: String,
    },
}

impl Display for JwtValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::TokenExpired {
                expired_at,
                current_time,
            } => write!(
                f,
                "JWT token expired {} ago at {}",
                humanize_duration(current_time.signed_duration_since(*expired_at)),
                expired_at.format("%Y-%m-%d %H:%M:%S UTC")
            ),
            Self::TokenInvalid { reason } => write!(f, "JWT token is invalid: {reason}"),
            Self::TokenMalformed { details } => write!(f, "JWT token is malformed: {details}"),
        }
    }
}

impl std::error::Error for JwtValidationError {}

impl From<JwtValidationError> for AppError {
    fn from(error: JwtValidationError) -> Self {
        match error {
            JwtValidationError::TokenExpired { .. } => Self::auth_expired(),
            other => Self::auth_invalid(other.to_string()),
        }
    }
}

/// `JWT` claims issued by the identity provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Local user id as a decimal string
    pub sub: String,
    /// Username, informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// The user id carried in `sub`
    ///
    /// # Errors
    ///
    /// Returns `TokenInvalid` if `sub` is not an integer id
    pub fn user_id(&self) -> Result<i64, JwtValidationError> {
        self.sub
            .parse()
            .map_err(|_| JwtValidationError::TokenInvalid {
                reason: format!("Subject '{}' is not a user id", self.sub),
            })
    }
}

/// Verifies bearer tokens and mints development tokens
#[derive(Clone)]
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry_hours: i64,
}

impl AuthManager {
    /// Create an authentication manager for an HS256 shared secret
    #[must_use]
    pub fn new(secret: &[u8], token_expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            token_expiry_hours,
        }
    }

    /// Sign a token for `user` valid for the configured number of hours
    ///
    /// # Errors
    ///
    /// Returns an internal error if encoding fails
    pub fn generate_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            username: Some(user.username.clone()),
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.token_expiry_hours)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign token: {e}")))
    }

    /// Validate a token and return its claims
    ///
    /// Expiry is checked separately from the signature so an expired token
    /// is reported as expired rather than invalid.
    ///
    /// # Errors
    ///
    /// Returns a [`JwtValidationError`] describing why the token was rejected
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtValidationError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_aud = false;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| Self::convert_jwt_error(&e))?;

        let current_time = Utc::now();
        if current_time.timestamp() > claims.exp {
            let expired_at = DateTime::from_timestamp(claims.exp, 0).unwrap_or(current_time);
            warn!(
                "JWT token expired for user {} {} ago",
                claims.sub,
                humanize_duration(current_time.signed_duration_since(expired_at))
            );
            return Err(JwtValidationError::TokenExpired {
                expired_at,
                current_time,
            });
        }

        debug!("JWT token validation successful for user: {}", claims.sub);
        Ok(claims)
    }

    /// Convert JWT library errors to detailed validation errors
    fn convert_jwt_error(e: &jsonwebtoken::errors::Error) -> JwtValidationError {
        use jsonwebtoken::errors::ErrorKind;
        debug!("JWT token validation failed: {:?}", e);

        match e.kind() {
            ErrorKind::InvalidSignature => JwtValidationError::TokenInvalid {
                reason: "Token signature verification failed".into(),
            },
            ErrorKind::ExpiredSignature => JwtValidationError::TokenExpired {
                expired_at: Utc::now(),
                current_time: Utc::now(),
            },
            ErrorKind::InvalidToken => JwtValidationError::TokenMalformed {
                details: "Token format is invalid".into(),
            },
            ErrorKind::Base64(base64_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid base64: {base64_err}"),
            },
            ErrorKind::Json(json_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid JSON: {json_err}"),
            },
            ErrorKind::Utf8(utf8_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid UTF-8: {utf8_err}"),
            },
            _ => JwtValidationError::TokenInvalid {
                reason: format!("Token validation failed: {e}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: 42,
            email: "cook@example.com".into(),
            username: "cook".into(),
            first_name: "Ada".into(),
            last_name: "Cook".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_generated_token_validates() {
        let manager = AuthManager::new(b"test-secret", 1);
        let token = manager.generate_token(&user()).unwrap();

        let claims = manager.validate_token(&token).unwrap();
        assert_eq!(claims.user_id().unwrap(), 42);
        assert_eq!(claims.username.as_deref(), Some("cook"));
    }

    #[test]
    fn test_token_from_other_secret_is_invalid() {
        let token = AuthManager::new(b"other-secret", 1)
            .generate_token(&user())
            .unwrap();

        let error = AuthManager::new(b"test-secret", 1)
            .validate_token(&token)
            .unwrap_err();
        assert!(matches!(error, JwtValidationError::TokenInvalid { .. }));
    }

    #[test]
    fn test_expired_token_maps_to_auth_expired() {
        let manager = AuthManager::new(b"test-secret", -2);
        let token = manager.generate_token(&user()).unwrap();

        let error = manager.validate_token(&token).unwrap_err();
        assert!(matches!(error, JwtValidationError::TokenExpired { .. }));
        assert_eq!(
            AppError::from(error).code,
            crate::errors::ErrorCode::AuthExpired
        );
    }

    #[test]
    fn test_garbage_is_malformed() {
        let error = AuthManager::new(b"test-secret", 1)
            .validate_token("not-a-jwt")
            .unwrap_err();
        assert!(matches!(
            error,
            JwtValidationError::TokenMalformed { .. } | JwtValidationError::TokenInvalid { .. }
        ));
    }
}
