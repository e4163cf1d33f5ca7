use super::*;

async fn reset_logs(
    db: &sea_orm::DatabaseConnection,
) -> Result<Vec<entity::authentication_log::Model>, DbErr> {
    use sea_orm::{ColumnTrait, QueryFilter, QueryOrder};

    entity::prelude::AuthenticationLog::find()
        .filter(entity::authentication_log::Column::EventType.eq("password_reset"))
        .order_by_asc(entity::authentication_log::Column::Id)
        .all(db)
        .await
}

/// Tests a reset request for a known address writes a log and an unknown one does not.
///
/// Expected: Ok both times, one success `password_reset` log for the known user
#[tokio::test]
async fn forgot_password_logs_known_address() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db)
        .email("reader@example.com")
        .build()
        .await?;

    let config = config();
    let email = EmailService::disabled(config.frontend_url.clone());
    let service = AuthService::new(db, &config, &email);

    service
        .forgot_password("reader@example.com", &client())
        .await
        .unwrap();
    service
        .forgot_password("nobody@example.com", &client())
        .await
        .unwrap();

    let logs = reset_logs(db).await?;
    assert_eq!(logs.len(), 1);
    assert!(logs[0].is_success);
    assert_eq!(logs[0].user_id, Some(user.id));

    Ok(())
}

/// Tests a token of another type cannot reset a password.
///
/// Expected: Err(BadRequest), one failure log with reason `invalid_token`
#[tokio::test]
async fn rejects_wrong_token_type() -> Result<(), DbErr> {
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
        .reset_password(
            ResetPasswordDto {
                token: access,
                new_password: "new-password".to_string(),
            },
            &client(),
        )
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let logs = reset_logs(db).await?;
    assert_eq!(logs.len(), 1);
    assert!(!logs[0].is_success);
    assert_eq!(logs[0].failure_reason.as_deref(), Some("invalid_token"));

    Ok(())
}

/// Tests a reset token sets the password once and is spent afterwards.
///
/// Expected: first reset Ok and the new password verifies; second Err(BadRequest) with
/// reason `token_used`
#[tokio::test]
async fn reset_token_works_once() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let model = factory::user::UserFactory::new(db)
        .hashed_password(hash_password("old-password").unwrap())
        .build()
        .await?;
    let config = config();
    let token = TokenService::new(&config.secret_key)
        .create_password_reset_token(&User::from_entity(model.clone()), 30)
        .unwrap();

    let email = EmailService::disabled(config.frontend_url.clone());
    let service = AuthService::new(db, &config, &email);
    let dto = |password: &str| ResetPasswordDto {
        token: token.clone(),
        new_password: password.to_string(),
    };

    service
        .reset_password(dto("new-password"), &client())
        .await
        .unwrap();

    let stored = entity::prelude::User::find_by_id(model.id)
        .one(db)
        .await?
        .unwrap();
    assert!(verify_password("new-password", &stored.hashed_password));

    let again = service.reset_password(dto("third-password"), &client()).await;
    assert!(matches!(again, Err(AppError::BadRequest(_))));

    let logs = reset_logs(db).await?;
    assert_eq!(logs.len(), 2);
    assert!(logs[0].is_success);
    assert_eq!(logs[1].failure_reason.as_deref(), Some("token_used"));

    Ok(())
}

/// Tests a reset token no longer works after the account is deactivated.
///
/// Expected: Err(BadRequest), password unchanged, reason `inactive_user`
#[tokio::test]
async fn rejects_inactive_account() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let model = factory::user::UserFactory::new(db)
        .hashed_password(hash_password("old-password").unwrap())
        .active(false)
        .build()
        .await?;
    let config = config();
    let token = TokenService::new(&config.secret_key)
        .create_password_reset_token(&User::from_entity(model.clone()), 30)
        .unwrap();

    let email = EmailService::disabled(config.frontend_url.clone());
    let result = AuthService::new(db, &config, &email)
        .reset_password(
            ResetPasswordDto {
                token,
                new_password: "new-password".to_string(),
            },
            &client(),
        )
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let stored = entity::prelude::User::find_by_id(model.id)
        .one(db)
        .await?
        .unwrap();
    assert!(verify_password("old-password", &stored.hashed_password));

    let logs = reset_logs(db).await?;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].failure_reason.as_deref(), Some("inactive_user"));

    Ok(())
}
