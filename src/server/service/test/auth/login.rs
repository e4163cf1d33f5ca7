use super::*;

async fn auth_logs(
    db: &sea_orm::DatabaseConnection,
) -> Result<Vec<entity::authentication_log::Model>, DbErr> {
    entity::prelude::AuthenticationLog::find().all(db).await
}

/// Tests a successful login issues a token and writes one success log.
///
/// Expected: Ok with a decodable token for the user, exactly one success row
#[tokio::test]
async fn logs_success() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db)
        .username("reader")
        .hashed_password(hash_password("correct-horse").unwrap())
        .build()
        .await?;

    let config = config();
    let email = EmailService::disabled(config.frontend_url.clone());
    let token = AuthService::new(db, &config, &email)
        .login(
            LoginDto {
                username: "reader".to_string(),
                password: "correct-horse".to_string(),
            },
            &client(),
        )
        .await
        .unwrap();

    assert_eq!(token.user.id, user.id);
    assert_eq!(token.expires_in, config.access_token_expire_minutes * 60);
    let claims = TokenService::new(&config.secret_key)
        .decode(&token.token, TokenType::Access)
        .unwrap();
    assert_eq!(claims.user_id().unwrap(), user.id);

    let logs = auth_logs(db).await?;
    assert_eq!(logs.len(), 1);
    assert!(logs[0].is_success);
    assert_eq!(logs[0].event_type, "login");
    assert_eq!(logs[0].user_id, Some(user.id));
    assert_eq!(logs[0].ip_address.as_deref(), Some("127.0.0.1"));

    Ok(())
}

/// Tests logging in by email address instead of username.
///
/// Expected: Ok for the matching user
#[tokio::test]
async fn accepts_email_identifier() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db)
        .email("reader@example.com")
        .hashed_password(hash_password("correct-horse").unwrap())
        .build()
        .await?;

    let config = config();
    let email = EmailService::disabled(config.frontend_url.clone());
    let token = AuthService::new(db, &config, &email)
        .login(
            LoginDto {
                username: "reader@example.com".to_string(),
                password: "correct-horse".to_string(),
            },
            &client(),
        )
        .await
        .unwrap();

    assert_eq!(token.user.id, user.id);

    Ok(())
}

/// Tests an unknown username is rejected and logged without a user id.
///
/// Expected: Err(InvalidCredentials), one failure row with reason `user_not_found`
#[tokio::test]
async fn logs_unknown_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let config = config();
    let email = EmailService::disabled(config.frontend_url.clone());
    let result = AuthService::new(db, &config, &email)
        .login(
            LoginDto {
                username: "ghost".to_string(),
                password: "whatever1".to_string(),
            },
            &client(),
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidCredentials))
    ));

    let logs = auth_logs(db).await?;
    assert_eq!(logs.len(), 1);
    assert!(!logs[0].is_success);
    assert_eq!(logs[0].user_id, None);
    assert_eq!(logs[0].failure_reason.as_deref(), Some("user_not_found"));

    Ok(())
}

/// Tests a wrong password is rejected and logged against the user.
///
/// Expected: Err(InvalidCredentials), one failure row with reason `invalid_password`
#[tokio::test]
async fn logs_invalid_password() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db)
        .username("reader")
        .hashed_password(hash_password("correct-horse").unwrap())
        .build()
        .await?;

    let config = config();
    let email = EmailService::disabled(config.frontend_url.clone());
    let result = AuthService::new(db, &config, &email)
        .login(
            LoginDto {
                username: "reader".to_string(),
                password: "battery-staple".to_string(),
            },
            &client(),
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidCredentials))
    ));

    let logs = auth_logs(db).await?;
    assert_eq!(logs.len(), 1);
    assert!(!logs[0].is_success);
    assert_eq!(logs[0].user_id, Some(user.id));
    assert_eq!(logs[0].failure_reason.as_deref(), Some("invalid_password"));

    Ok(())
}

/// Tests a deactivated account cannot log in even with the right password.
///
/// Expected: Err(InactiveUser), one failure row with reason `inactive_user`
#[tokio::test]
async fn logs_inactive_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .username("sleeper")
        .hashed_password(hash_password("correct-horse").unwrap())
        .active(false)
        .build()
        .await?;

    let config = config();
    let email = EmailService::disabled(config.frontend_url.clone());
    let result = AuthService::new(db, &config, &email)
        .login(
            LoginDto {
                username: "sleeper".to_string(),
                password: "correct-horse".to_string(),
            },
            &client(),
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InactiveUser(_)))
    ));

    let logs = auth_logs(db).await?;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].failure_reason.as_deref(), Some("inactive_user"));
    assert_eq!(
        entity::prelude::AuthenticationLog::find().count(db).await?,
        1
    );

    Ok(())
}

/// Tests an inactive account is reported as inactive even with a wrong password.
///
/// Expected: Err(InactiveUser), one failure log with reason `inactive_user`
#[tokio::test]
async fn inactive_user_with_wrong_password() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .username("sleeper")
        .hashed_password(hash_password("correct-horse").unwrap())
        .active(false)
        .build()
        .await?;

    let config = config();
    let email = EmailService::disabled(config.frontend_url.clone());
    let result = AuthService::new(db, &config, &email)
        .login(
            LoginDto {
                username: "sleeper".to_string(),
                password: "wrong-horse".to_string(),
            },
            &client(),
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InactiveUser(_)))
    ));

    let logs = auth_logs(db).await?;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].failure_reason.as_deref(), Some("inactive_user"));

    Ok(())
}
