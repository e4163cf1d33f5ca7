use super::*;

async fn refresh_logs(
    db: &sea_orm::DatabaseConnection,
) -> Result<Vec<entity::authentication_log::Model>, DbErr> {
    use sea_orm::{ColumnTrait, QueryFilter, QueryOrder};

    entity::prelude::AuthenticationLog::find()
        .filter(entity::authentication_log::Column::EventType.eq("token_refresh"))
        .order_by_asc(entity::authentication_log::Column::Id)
        .all(db)
        .await
}

/// Tests the refresh token from login buys a new token pair.
///
/// Expected: Ok with a valid access and refresh token, one success `token_refresh` log
#[tokio::test]
async fn exchanges_refresh_token() -> Result<(), DbErr> {
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
    let service = AuthService::new(db, &config, &email);
    let login = service
        .login(
            LoginDto {
                username: "reader".to_string(),
                password: "correct-horse".to_string(),
            },
            &client(),
        )
        .await
        .unwrap();

    let refreshed = service.refresh(&login.refresh_token, &client()).await.unwrap();

    assert_eq!(refreshed.user.id, user.id);
    let tokens = TokenService::new(&config.secret_key);
    assert!(tokens.decode(&refreshed.token, TokenType::Access).is_ok());
    assert!(tokens
        .decode(&refreshed.refresh_token, TokenType::Refresh)
        .is_ok());

    let logs = refresh_logs(db).await?;
    assert_eq!(logs.len(), 1);
    assert!(logs[0].is_success);
    assert_eq!(logs[0].user_id, Some(user.id));

    Ok(())
}

/// Tests an access token is refused where a refresh token is expected.
///
/// Expected: Err(InvalidToken), one failure log with reason `invalid_token`
#[tokio::test]
async fn rejects_access_token() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let model = factory::create_user(db).await?;
    let config = config();
    let access = TokenService::new(&config.secret_key)
        .create_access_token(&User::from_entity(model), 30)
        .unwrap();

    let email = EmailService::disabled(config.frontend_url.clone());
    let result = AuthService::new(db, &config, &email)
        .refresh(&access, &client())
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidToken))
    ));

    let logs = refresh_logs(db).await?;
    assert_eq!(logs.len(), 1);
    assert!(!logs[0].is_success);
    assert_eq!(logs[0].user_id, None);
    assert_eq!(logs[0].failure_reason.as_deref(), Some("invalid_token"));

    Ok(())
}

/// Tests a refresh token stops working once the account is deactivated.
///
/// Expected: Err(InactiveUser), one failure log naming the user
#[tokio::test]
async fn rejects_inactive_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let model = factory::user::UserFactory::new(db)
        .active(false)
        .build()
        .await?;
    let config = config();
    let refresh = TokenService::new(&config.secret_key)
        .create_refresh_token(&User::from_entity(model.clone()), 30)
        .unwrap();

    let email = EmailService::disabled(config.frontend_url.clone());
    let result = AuthService::new(db, &config, &email)
        .refresh(&refresh, &client())
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InactiveUser(id))) if id == model.id
    ));

    let logs = refresh_logs(db).await?;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].user_id, Some(model.id));
    assert_eq!(logs[0].failure_reason.as_deref(), Some("inactive_user"));

    Ok(())
}
