//! Signed bearer tokens.
//!
//! Tokens are HS256 JWTs carrying the user id, role and a `type` claim that keeps access,
//! refresh and password reset tokens from being used in place of each other. Password
//! reset tokens also carry a fingerprint of the password they replace, so they stop
//! working once that password changes.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use crate::server::{
    error::{auth::AuthError, AppError},
    model::user::{Role, User},
    service::password::password_fingerprint,
};

/// Purpose of a token, stored in the `type` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    Refresh,
    PasswordReset,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id as a decimal string
    pub sub: String,
    pub role: String,
    #[serde(rename = "type")]
    pub token_type: TokenType,
    pub iat: i64,
    pub exp: i64,
    /// Password fingerprint, only present on password reset tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fgp: Option<String>,
}

impl Claims {
    /// Parses `sub` back into a user id.
    pub fn user_id(&self) -> Result<i32, AuthError> {
        self.sub.parse().map_err(|_| AuthError::InvalidToken)
    }

    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }
}

pub struct TokenService<'a> {
    secret: &'a str,
}

impl<'a> TokenService<'a> {
    pub fn new(secret: &'a str) -> Self {
        Self { secret }
    }

    /// Issues an access token for `user` valid for `minutes`.
    pub fn create_access_token(&self, user: &User, minutes: i64) -> Result<String, AppError> {
        self.create(user, TokenType::Access, minutes, None)
    }

    /// Issues a refresh token for `user` valid for `minutes`.
    pub fn create_refresh_token(&self, user: &User, minutes: i64) -> Result<String, AppError> {
        self.create(user, TokenType::Refresh, minutes, None)
    }

    /// Issues a password reset token for `user` valid for `minutes`, bound to the
    /// user's current password.
    pub fn create_password_reset_token(
        &self,
        user: &User,
        minutes: i64,
    ) -> Result<String, AppError> {
        let fingerprint = password_fingerprint(&user.hashed_password);

        self.create(user, TokenType::PasswordReset, minutes, Some(fingerprint))
    }

    /// Verifies the signature and expiry of a token and checks its type.
    ///
    /// # Returns
    /// - `Ok(Claims)` - Token is valid and of the expected type
    /// - `Err(AuthError::ExpiredToken)` - Signature is valid but `exp` has passed
    /// - `Err(AuthError::InvalidToken)` - Any other failure, including a type mismatch
    pub fn decode(&self, token: &str, expected: TokenType) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|err| match err.kind() {
            ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
            _ => AuthError::InvalidToken,
        })?;

        if data.claims.token_type != expected {
            return Err(AuthError::InvalidToken);
        }

        Ok(data.claims)
    }

    fn create(
        &self,
        user: &User,
        token_type: TokenType,
        minutes: i64,
        fgp: Option<String>,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let expires = Duration::try_minutes(minutes)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                AppError::InternalError(format!(
                    "Token lifetime of {} minutes is out of range",
                    minutes
                ))
            })?;
        let claims = Claims {
            sub: user.id.to_string(),
            role: user.role().as_str().to_string(),
            token_type,
            iat: now.timestamp(),
            exp: expires.timestamp(),
            fgp,
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;

        Ok(token)
    }
}
