use crate::server::{
    error::auth::AuthError,
    model::user::{Role, User},
    service::token::{TokenService, TokenType},
};
use chrono::Utc;

fn user(id: i32, is_admin: bool) -> User {
    let now = Utc::now();
    User::from_entity(entity::user::Model {
        id,
        email: format!("user{id}@example.com"),
        username: format!("user{id}"),
        full_name: None,
        hashed_password: String::new(),
        is_active: true,
        is_admin,
        avatar_url: None,
        bio: None,
        created_at: now,
        updated_at: now,
    })
}

/// Tests access token claims round trip the user id and role.
///
/// Expected: `sub` parses to the user id and `role` matches admin or user
#[test]
fn claims_carry_id_and_role() {
    let service = TokenService::new("test-secret-key");

    let admin = service.create_access_token(&user(42, true), 30).unwrap();
    let claims = service.decode(&admin, TokenType::Access).unwrap();
    assert_eq!(claims.sub, "42");
    assert_eq!(claims.user_id().unwrap(), 42);
    assert_eq!(claims.role(), Some(Role::Admin));
    assert!(claims.exp > claims.iat);

    let reader = service.create_access_token(&user(7, false), 30).unwrap();
    let claims = service.decode(&reader, TokenType::Access).unwrap();
    assert_eq!(claims.user_id().unwrap(), 7);
    assert_eq!(claims.role(), Some(Role::User));
}

/// Tests a reset token cannot be used as an access token and vice versa.
///
/// Expected: Err(InvalidToken) on type mismatch
#[test]
fn rejects_wrong_token_type() {
    let service = TokenService::new("test-secret-key");

    let reset = service
        .create_password_reset_token(&user(1, false), 60)
        .unwrap();
    assert!(matches!(
        service.decode(&reset, TokenType::Access),
        Err(AuthError::InvalidToken)
    ));

    let access = service.create_access_token(&user(1, false), 60).unwrap();
    assert!(matches!(
        service.decode(&access, TokenType::PasswordReset),
        Err(AuthError::InvalidToken)
    ));
}

/// Tests signature and expiry failures.
///
/// Expected: Err(InvalidToken) for another secret, Err(ExpiredToken) once `exp` passed
#[test]
fn rejects_foreign_and_expired_tokens() {
    let service = TokenService::new("test-secret-key");

    let foreign = TokenService::new("other-secret")
        .create_access_token(&user(1, false), 30)
        .unwrap();
    assert!(matches!(
        service.decode(&foreign, TokenType::Access),
        Err(AuthError::InvalidToken)
    ));

    let expired = service.create_access_token(&user(1, false), -5).unwrap();
    assert!(matches!(
        service.decode(&expired, TokenType::Access),
        Err(AuthError::ExpiredToken)
    ));

    assert!(matches!(
        service.decode("not-a-jwt", TokenType::Access),
        Err(AuthError::InvalidToken)
    ));
}

/// Tests refresh tokens are only accepted where a refresh token is expected.
///
/// Expected: Ok for TokenType::Refresh, Err(InvalidToken) when used as an access token
#[test]
fn refresh_token_is_not_an_access_token() {
    let service = TokenService::new("test-secret-key");

    let refresh = service.create_refresh_token(&user(3, false), 60).unwrap();

    let claims = service.decode(&refresh, TokenType::Refresh).unwrap();
    assert_eq!(claims.user_id().unwrap(), 3);
    assert!(claims.fgp.is_none());
    assert!(matches!(
        service.decode(&refresh, TokenType::Access),
        Err(AuthError::InvalidToken)
    ));
}

/// Tests a lifetime too large for the clock is an error rather than a panic.
///
/// Expected: Err from create_access_token
#[test]
fn oversized_lifetime_is_an_error() {
    let service = TokenService::new("test-secret-key");

    assert!(service.create_access_token(&user(1, false), i64::MAX).is_err());
}
