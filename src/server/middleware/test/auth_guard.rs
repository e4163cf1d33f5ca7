use axum::{
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
};
use sea_orm::{DbErr, EntityTrait};
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    config::{Config, Environment},
    error::{auth::AuthError, AppError},
    middleware::auth::{AuthGuard, Permission},
    model::{log::ClientInfo, user::User},
    service::token::TokenService,
};

fn config() -> Config {
    Config::for_environment(Environment::Development, "sqlite::memory:", "test-secret-key")
}

fn bearer(config: &Config, user: &User) -> HeaderMap {
    let token = TokenService::new(&config.secret_key)
        .create_access_token(user, 30)
        .unwrap();

    let mut headers = HeaderMap::new();
    headers.insert(
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
    );
    headers
}

fn client() -> ClientInfo {
    ClientInfo {
        ip_address: Some("127.0.0.1".to_string()),
        user_agent: None,
        path: Some("/api/v1/books".to_string()),
    }
}

/// Tests a request without a token is rejected with 401 and logged.
///
/// Expected: Err(MissingToken) mapping to 401, one failure log `missing_token`
#[tokio::test]
async fn missing_token_is_unauthorized() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let config = config();

    let result = AuthGuard::new(db, &config)
        .require(&HeaderMap::new(), &client(), &[Permission::Admin])
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, AppError::AuthErr(AuthError::MissingToken)));
    assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);

    let logs = entity::prelude::AuthenticationLog::find().all(db).await?;
    assert_eq!(logs.len(), 1);
    assert!(!logs[0].is_success);
    assert_eq!(logs[0].event_type, "authentication");
    assert_eq!(logs[0].failure_reason.as_deref(), Some("missing_token"));

    Ok(())
}

/// Tests a malformed token is rejected with 401.
///
/// Expected: Err(InvalidToken), one failure log `invalid_token`
#[tokio::test]
async fn garbage_token_is_unauthorized() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let config = config();

    let mut headers = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer nonsense"));

    let result = AuthGuard::new(db, &config)
        .require(&headers, &client(), &[])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidToken))
    ));

    let logs = entity::prelude::AuthenticationLog::find().all(db).await?;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].failure_reason.as_deref(), Some("invalid_token"));

    Ok(())
}

/// Tests a signed-in regular user is refused an admin permission.
///
/// Expected: Err(AccessDenied) mapping to 403, failure log `insufficient_permissions`
#[tokio::test]
async fn regular_user_is_forbidden_from_admin() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let config = config();

    let user = User::from_entity(factory::create_user(db).await?);
    let headers = bearer(&config, &user);

    let err = AuthGuard::new(db, &config)
        .require(&headers, &client(), &[Permission::Admin])
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::AuthErr(AuthError::AccessDenied(id, _)) if id == user.id));
    assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);

    let logs = entity::prelude::AuthenticationLog::find().all(db).await?;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].user_id, Some(user.id));
    assert_eq!(
        logs[0].failure_reason.as_deref(),
        Some("insufficient_permissions")
    );

    Ok(())
}

/// Tests a deactivated account is refused even with a valid token.
///
/// Expected: Err(InactiveUser) mapping to 403, failure log `inactive_user`
#[tokio::test]
async fn inactive_user_is_forbidden() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let config = config();

    let user = User::from_entity(
        factory::user::UserFactory::new(db)
            .active(false)
            .build()
            .await?,
    );
    let headers = bearer(&config, &user);

    let err = AuthGuard::new(db, &config)
        .require(&headers, &client(), &[])
        .await
        .unwrap_err();

    assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);

    let logs = entity::prelude::AuthenticationLog::find().all(db).await?;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].failure_reason.as_deref(), Some("inactive_user"));

    Ok(())
}

/// Tests an admin passes the admin permission check.
///
/// Expected: Ok(User), one success log for the admin
#[tokio::test]
async fn admin_is_accepted() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let config = config();

    let admin = User::from_entity(factory::create_admin(db).await?);
    let headers = bearer(&config, &admin);

    let user = AuthGuard::new(db, &config)
        .require(&headers, &client(), &[Permission::Admin])
        .await
        .unwrap();

    assert_eq!(user.id, admin.id);

    let logs = entity::prelude::AuthenticationLog::find().all(db).await?;
    assert_eq!(logs.len(), 1);
    assert!(logs[0].is_success);
    assert_eq!(logs[0].user_id, Some(admin.id));

    Ok(())
}

/// Tests optional identification never logs.
///
/// Expected: Some(user) for a valid token, None without one, zero log rows
#[tokio::test]
async fn identify_is_silent() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let config = config();

    let user = User::from_entity(factory::create_user(db).await?);
    let guard = AuthGuard::new(db, &config);

    assert_eq!(
        guard.identify(&bearer(&config, &user)).await.map(|u| u.id),
        Some(user.id)
    );
    assert!(guard.identify(&HeaderMap::new()).await.is_none());
    assert!(entity::prelude::AuthenticationLog::find()
        .all(db)
        .await?
        .is_empty());

    Ok(())
}

/// Tests a refresh token cannot be used as a bearer token.
///
/// Expected: Err(InvalidToken), one failure log `invalid_token`
#[tokio::test]
async fn refresh_token_is_not_a_bearer() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let config = config();

    let user = User::from_entity(factory::create_user(db).await?);
    let token = TokenService::new(&config.secret_key)
        .create_refresh_token(&user, 30)
        .unwrap();
    let mut headers = HeaderMap::new();
    headers.insert(
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
    );

    let result = AuthGuard::new(db, &config)
        .require(&headers, &client(), &[])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidToken))
    ));

    let logs = entity::prelude::AuthenticationLog::find().all(db).await?;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].failure_reason.as_deref(), Some("invalid_token"));

    Ok(())
}
