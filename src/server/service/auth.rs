//! Account authentication flows.
//!
//! Registration, credential login and the password lifecycle. Every outcome that a
//! security review would care about is written to the authentication log; login in
//! particular writes exactly one row per attempt.

use sea_orm::DatabaseConnection;

use crate::{
    model::auth::{ChangePasswordDto, LoginDto, RegisterDto, ResetPasswordDto},
    server::{
        config::Config,
        data::user::UserRepository,
        error::{auth::AuthError, AppError},
        model::{
            log::{AuthEvent, AuthenticationLogParams, ClientInfo},
            user::{CreateUserParams, UpdateUserParams, User},
        },
        service::{
            email::EmailService,
            log::LogService,
            password::{hash_password, password_fingerprint, verify_password},
            token::{TokenService, TokenType},
        },
    },
};

/// A freshly issued access and refresh token pair and the account it belongs to.
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: String,
    pub refresh_token: String,
    /// Lifetime of the access token in seconds
    pub expires_in: i64,
    pub user: User,
}

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    config: &'a Config,
    email: &'a EmailService,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection, config: &'a Config, email: &'a EmailService) -> Self {
        Self { db, config, email }
    }

    /// Creates a new active, non-admin account.
    ///
    /// The welcome email is sent best-effort; a delivery failure is logged and does not
    /// fail registration.
    ///
    /// # Returns
    /// - `Ok(User)` - The created account
    /// - `Err(AppError::Conflict)` - Email or username already taken
    pub async fn register(&self, dto: RegisterDto, client: &ClientInfo) -> Result<User, AppError> {
        let repo = UserRepository::new(self.db);

        if repo.find_by_email(&dto.email).await?.is_some() {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }
        if repo.find_by_username(dto.username.trim()).await?.is_some() {
            return Err(AppError::Conflict("Username already taken".to_string()));
        }

        let hashed = hash_password(&dto.password)?;
        let user = repo.create(CreateUserParams::register(dto, hashed)).await?;

        LogService::new(self.db)
            .record_authentication(AuthenticationLogParams::success(
                AuthEvent::Register,
                user.id,
                client,
            ))
            .await;

        if let Err(err) = self.email.send_welcome(&user).await {
            tracing::warn!("Failed to send welcome email to user {}: {}", user.id, err);
        }

        Ok(user)
    }

    /// Verifies credentials and issues an access and refresh token pair.
    ///
    /// `dto.username` is treated as an email address when it contains `@`.
    ///
    /// # Returns
    /// - `Ok(AccessToken)` - Credentials valid and account active
    /// - `Err(AuthError::InvalidCredentials)` - Unknown account or wrong password
    /// - `Err(AuthError::InactiveUser)` - Account deactivated
    pub async fn login(&self, dto: LoginDto, client: &ClientInfo) -> Result<AccessToken, AppError> {
        let repo = UserRepository::new(self.db);
        let log = LogService::new(self.db);

        let identifier = dto.username.trim();
        let user = if identifier.contains('@') {
            repo.find_by_email(identifier).await?
        } else {
            repo.find_by_username(identifier).await?
        };

        let details = serde_json::json!({ "username": identifier });

        let Some(user) = user else {
            log.record_authentication(
                AuthenticationLogParams::failure(AuthEvent::Login, None, "user_not_found", client)
                    .with_details(details),
            )
            .await;
            return Err(AuthError::InvalidCredentials.into());
        };

        if !user.is_active {
            log.record_authentication(
                AuthenticationLogParams::failure(
                    AuthEvent::Login,
                    Some(user.id),
                    "inactive_user",
                    client,
                )
                .with_details(details),
            )
            .await;
            return Err(AuthError::InactiveUser(user.id).into());
        }

        if !verify_password(&dto.password, &user.hashed_password) {
            log.record_authentication(
                AuthenticationLogParams::failure(
                    AuthEvent::Login,
                    Some(user.id),
                    "invalid_password",
                    client,
                )
                .with_details(details),
            )
            .await;
            return Err(AuthError::InvalidCredentials.into());
        }

        let issued = self.issue(user)?;

        log.record_authentication(AuthenticationLogParams::success(
            AuthEvent::Login,
            issued.user.id,
            client,
        ))
        .await;

        Ok(issued)
    }

    /// Exchanges a refresh token for a new access and refresh token pair.
    ///
    /// Writes exactly one `token_refresh` authentication log per call.
    ///
    /// # Returns
    /// - `Ok(AccessToken)` - Token valid and account still active
    /// - `Err(AuthError::InvalidToken)` / `Err(AuthError::ExpiredToken)` - Token rejected
    /// - `Err(AuthError::UserNotFound)` - Account deleted since the token was issued
    /// - `Err(AuthError::InactiveUser)` - Account deactivated
    pub async fn refresh(
        &self,
        refresh_token: &str,
        client: &ClientInfo,
    ) -> Result<AccessToken, AppError> {
        let log = LogService::new(self.db);

        let user = match self.refresh_owner(refresh_token).await {
            Ok(user) => user,
            Err(AppError::AuthErr(err)) => {
                let user_id = match err {
                    AuthError::UserNotFound(id) | AuthError::InactiveUser(id) => Some(id),
                    _ => None,
                };
                log.record_authentication(AuthenticationLogParams::failure(
                    AuthEvent::TokenRefresh,
                    user_id,
                    err.reason(),
                    client,
                ))
                .await;
                return Err(err.into());
            }
            Err(err) => return Err(err),
        };

        let issued = self.issue(user)?;

        log.record_authentication(AuthenticationLogParams::success(
            AuthEvent::TokenRefresh,
            issued.user.id,
            client,
        ))
        .await;

        Ok(issued)
    }

    /// Resolves the active account a refresh token belongs to.
    async fn refresh_owner(&self, refresh_token: &str) -> Result<User, AppError> {
        let claims = TokenService::new(&self.config.secret_key)
            .decode(refresh_token, TokenType::Refresh)?;
        let user_id = claims.user_id()?;

        let user = UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound(user_id))?;
        if !user.is_active {
            return Err(AuthError::InactiveUser(user.id).into());
        }

        Ok(user)
    }

    fn issue(&self, user: User) -> Result<AccessToken, AppError> {
        let tokens = TokenService::new(&self.config.secret_key);
        let minutes = self.config.access_token_expire_minutes;

        Ok(AccessToken {
            token: tokens.create_access_token(&user, minutes)?,
            refresh_token: tokens
                .create_refresh_token(&user, self.config.refresh_token_expire_minutes)?,
            expires_in: minutes * 60,
            user,
        })
    }

    /// Emails a password reset link when the address belongs to an active account.
    ///
    /// Always succeeds from the caller's point of view so the endpoint cannot be used to
    /// discover registered addresses.
    pub async fn forgot_password(&self, email: &str, client: &ClientInfo) -> Result<(), AppError> {
        let Some(user) = UserRepository::new(self.db).find_by_email(email).await? else {
            return Ok(());
        };
        if !user.is_active {
            return Ok(());
        }

        let token = TokenService::new(&self.config.secret_key)
            .create_password_reset_token(&user, self.config.password_reset_expire_minutes)?;

        if let Err(err) = self.email.send_password_reset(&user, &token).await {
            tracing::warn!("Failed to send password reset email to user {}: {}", user.id, err);
        }

        LogService::new(self.db)
            .record_authentication(
                AuthenticationLogParams::success(AuthEvent::PasswordReset, user.id, client)
                    .with_details(serde_json::json!({ "stage": "requested" })),
            )
            .await;

        Ok(())
    }

    /// Sets a new password using a reset token.
    ///
    /// The token only works while the password it was issued against is still in place,
    /// so a completed reset spends it.
    ///
    /// # Returns
    /// - `Ok(())` - Password replaced
    /// - `Err(AppError::BadRequest)` - Token invalid, expired, of the wrong type, already
    ///   used, or for an account that no longer exists or is inactive
    pub async fn reset_password(
        &self,
        dto: ResetPasswordDto,
        client: &ClientInfo,
    ) -> Result<(), AppError> {
        let log = LogService::new(self.db);
        let repo = UserRepository::new(self.db);
        let invalid = || AppError::BadRequest("Invalid or expired reset token".to_string());

        let claims = match TokenService::new(&self.config.secret_key)
            .decode(&dto.token, TokenType::PasswordReset)
        {
            Ok(claims) => claims,
            Err(err) => {
                log.record_authentication(AuthenticationLogParams::failure(
                    AuthEvent::PasswordReset,
                    None,
                    err.reason(),
                    client,
                ))
                .await;
                return Err(invalid());
            }
        };
        let user_id = claims.user_id().map_err(|_| invalid())?;

        let Some(user) = repo.find_by_id(user_id).await? else {
            return Err(invalid());
        };

        let reason = if !user.is_active {
            Some("inactive_user")
        } else if claims.fgp != Some(password_fingerprint(&user.hashed_password)) {
            Some("token_used")
        } else {
            None
        };
        if let Some(reason) = reason {
            log.record_authentication(AuthenticationLogParams::failure(
                AuthEvent::PasswordReset,
                Some(user.id),
                reason,
                client,
            ))
            .await;
            return Err(invalid());
        }

        let hashed = hash_password(&dto.new_password)?;
        repo.update(user.id, UpdateUserParams::password(hashed)).await?;

        log.record_authentication(
            AuthenticationLogParams::success(AuthEvent::PasswordReset, user.id, client)
                .with_details(serde_json::json!({ "stage": "completed" })),
        )
        .await;

        Ok(())
    }

    /// Replaces the password of an authenticated user after re-checking the current one.
    ///
    /// # Returns
    /// - `Ok(())` - Password replaced
    /// - `Err(AppError::BadRequest)` - Current password does not match
    pub async fn change_password(
        &self,
        user: &User,
        dto: ChangePasswordDto,
        client: &ClientInfo,
    ) -> Result<(), AppError> {
        let log = LogService::new(self.db);

        if !verify_password(&dto.current_password, &user.hashed_password) {
            log.record_authentication(AuthenticationLogParams::failure(
                AuthEvent::PasswordChange,
                Some(user.id),
                "invalid_password",
                client,
            ))
            .await;
            return Err(AppError::BadRequest(
                "Current password is incorrect".to_string(),
            ));
        }

        let hashed = hash_password(&dto.new_password)?;
        UserRepository::new(self.db)
            .update(user.id, UpdateUserParams::password(hashed))
            .await?;

        log.record_authentication(AuthenticationLogParams::success(
            AuthEvent::PasswordChange,
            user.id,
            client,
        ))
        .await;

        Ok(())
    }
}
