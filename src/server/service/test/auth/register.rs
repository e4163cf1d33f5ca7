use super::*;

fn register_dto(email: &str, username: &str) -> RegisterDto {
    RegisterDto {
        email: email.to_string(),
        username: username.to_string(),
        password: "long-enough-password".to_string(),
        full_name: Some("Ada Reader".to_string()),
    }
}

/// Tests registering creates an active regular account with a hashed password.
///
/// Expected: Ok(User) that is active, not admin, and can log in
#[tokio::test]
async fn creates_regular_account() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let config = config();
    let email = EmailService::disabled(config.frontend_url.clone());
    let service = AuthService::new(db, &config, &email);

    let user = service
        .register(register_dto("ada@example.com", "ada"), &client())
        .await
        .unwrap();

    assert!(user.is_active);
    assert!(!user.is_admin);
    assert_ne!(user.hashed_password, "long-enough-password");

    let token = service
        .login(
            LoginDto {
                username: "ada".to_string(),
                password: "long-enough-password".to_string(),
            },
            &client(),
        )
        .await;
    assert!(token.is_ok());

    Ok(())
}

/// Tests registering with a taken email or username.
///
/// Expected: Err(Conflict) for both, and no extra user rows
#[tokio::test]
async fn rejects_taken_email_and_username() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .email("taken@example.com")
        .username("taken")
        .build()
        .await?;

    let config = config();
    let email = EmailService::disabled(config.frontend_url.clone());
    let service = AuthService::new(db, &config, &email);

    let by_email = service
        .register(register_dto("taken@example.com", "fresh"), &client())
        .await;
    let by_username = service
        .register(register_dto("fresh@example.com", "taken"), &client())
        .await;

    assert!(matches!(by_email, Err(AppError::Conflict(_))));
    assert!(matches!(by_username, Err(AppError::Conflict(_))));
    assert_eq!(entity::prelude::User::find().count(db).await?, 1);

    Ok(())
}
