//! Bearer token authentication.
//!
//! `AuthGuard` checks a request's bearer token step by step: header present, token
//! decodes as an access token, user exists, user active, and finally the required
//! permissions. Each rejection writes one failure authentication log with its reason
//! and each acceptance writes one success log.
//!
//! Handlers opt in through the extractors `CurrentUser`, `AdminUser` and `OptionalUser`.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use sea_orm::DatabaseConnection;

use crate::server::{
    config::Config,
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    middleware::context::{Identity, RequestContext},
    model::{
        log::{AuthEvent, AuthenticationLogParams, ClientInfo},
        user::User,
    },
    service::{
        log::LogService,
        token::{TokenService, TokenType},
    },
    state::AppState,
};

pub enum Permission {
    Admin,
}

pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    config: &'a Config,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, config: &'a Config) -> Self {
        Self { db, config }
    }

    /// Authenticates a request and checks permissions, logging the outcome.
    ///
    /// # Arguments
    /// - `headers` - Request headers holding `Authorization`
    /// - `client` - Caller metadata copied into the authentication log
    /// - `permissions` - Permissions the user must hold; empty for any signed-in user
    ///
    /// # Returns
    /// - `Ok(User)` - Authenticated user holding every permission
    /// - `Err(AppError::AuthErr)` - 401 for token and account failures, 403 for inactive
    ///   accounts and missing permissions
    pub async fn require(
        &self,
        headers: &HeaderMap,
        client: &ClientInfo,
        permissions: &[Permission],
    ) -> Result<User, AppError> {
        let log = LogService::new(self.db);

        match self.check(headers, permissions).await {
            Ok(user) => {
                log.record_authentication(AuthenticationLogParams::success(
                    AuthEvent::Authentication,
                    user.id,
                    client,
                ))
                .await;
                Ok(user)
            }
            Err(Rejection::Auth(err, user_id)) => {
                log.record_authentication(
                    AuthenticationLogParams::failure(
                        AuthEvent::Authentication,
                        user_id,
                        err.reason(),
                        client,
                    )
                    .with_details(serde_json::json!({ "path": client.path })),
                )
                .await;
                Err(err.into())
            }
            Err(Rejection::Db(err)) => Err(err.into()),
        }
    }

    /// Resolves the caller from an optional bearer token without logging.
    ///
    /// Any failure, including a database error, is treated as an anonymous caller.
    pub async fn identify(&self, headers: &HeaderMap) -> Option<User> {
        if !headers.contains_key(header::AUTHORIZATION) {
            return None;
        }

        self.check(headers, &[]).await.ok()
    }

    async fn check(&self, headers: &HeaderMap, permissions: &[Permission]) -> Result<User, Rejection> {
        let token = bearer_token(headers).ok_or(Rejection::Auth(AuthError::MissingToken, None))?;

        let claims = TokenService::new(&self.config.secret_key)
            .decode(token, TokenType::Access)
            .map_err(|err| Rejection::Auth(err, None))?;
        let user_id = claims
            .user_id()
            .map_err(|err| Rejection::Auth(err, None))?;

        let Some(user) = UserRepository::new(self.db)
            .find_by_id(user_id)
            .await
            .map_err(Rejection::Db)?
        else {
            return Err(Rejection::Auth(AuthError::UserNotFound(user_id), Some(user_id)));
        };

        if !user.is_active {
            return Err(Rejection::Auth(AuthError::InactiveUser(user.id), Some(user.id)));
        }

        for permission in permissions {
            match permission {
                Permission::Admin => {
                    if !user.is_admin {
                        return Err(Rejection::Auth(
                            AuthError::AccessDenied(
                                user.id,
                                "admin permission required".to_string(),
                            ),
                            Some(user.id),
                        ));
                    }
                }
            }
        }

        Ok(user)
    }
}

enum Rejection {
    /// Authentication failure and the user id it concerns, when known
    Auth(AuthError, Option<i32>),
    Db(sea_orm::DbErr),
}

/// Extracts the token from `Authorization: Bearer <token>`.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() {
        Some(token.trim())
    } else {
        None
    }
}

fn attach_identity(parts: &Parts, user: &User) {
    if let Some(context) = parts.extensions.get::<RequestContext>() {
        context.set_identity(Identity {
            user_id: user.id,
            is_admin: user.is_admin,
        });
    }
}

async fn authenticate(
    parts: &Parts,
    state: &AppState,
    permissions: &[Permission],
) -> Result<User, AppError> {
    let client = ClientInfo::from_parts(parts);
    let user = AuthGuard::new(&state.db, &state.config)
        .require(&parts.headers, &client, permissions)
        .await?;

    attach_identity(parts, &user);

    Ok(user)
}

/// Any signed-in, active user.
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        authenticate(parts, state, &[]).await.map(CurrentUser)
    }
}

/// A signed-in, active admin.
pub struct AdminUser(pub User);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        authenticate(parts, state, &[Permission::Admin])
            .await
            .map(AdminUser)
    }
}

/// The caller when a valid bearer token was sent, otherwise `None`. Never rejects.
pub struct OptionalUser(pub Option<User>);

impl OptionalUser {
    pub fn is_admin(&self) -> bool {
        self.0.as_ref().is_some_and(|u| u.is_admin)
    }

    pub fn user_id(&self) -> Option<i32> {
        self.0.as_ref().map(|u| u.id)
    }
}

impl FromRequestParts<AppState> for OptionalUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let user = AuthGuard::new(&state.db, &state.config)
            .identify(&parts.headers)
            .await;

        if let Some(user) = &user {
            attach_identity(parts, user);
        }

        Ok(OptionalUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_token_requires_scheme_and_value() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers), Some("abc.def"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("bearer xyz"));
        assert_eq!(bearer_token(&headers), Some("xyz"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic dXNlcg=="));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);
    }
}
