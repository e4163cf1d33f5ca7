use super::*;

/// Tests success and failure records store their status and reason.
///
/// Expected: Ok with `is_success` and `failure_reason` matching each event
#[tokio::test]
async fn stores_success_and_failure() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_log_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let client = ClientInfo {
        ip_address: Some("10.0.0.1".to_string()),
        user_agent: Some("tests".to_string()),
        path: None,
    };
    let repo = AuthenticationLogRepository::new(db);

    let ok = repo
        .create(AuthenticationLogParams::success(AuthEvent::Login, 7, &client))
        .await?;
    let failed = repo
        .create(AuthenticationLogParams::failure(
            AuthEvent::Login,
            None,
            "user_not_found",
            &client,
        ))
        .await?;

    assert!(ok.is_success);
    assert_eq!(ok.status, "success");
    assert_eq!(ok.event_type, "login");
    assert_eq!(ok.user_id, Some(7));
    assert_eq!(ok.ip_address.as_deref(), Some("10.0.0.1"));

    assert!(!failed.is_success);
    assert_eq!(failed.status, "failure");
    assert_eq!(failed.failure_reason.as_deref(), Some("user_not_found"));
    assert_eq!(failed.user_id, None);

    Ok(())
}

/// Tests listing filtered by user only returns that user's events.
///
/// Expected: Ok with 2 of 3 rows for user 1
#[tokio::test]
async fn filters_by_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_log_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let client = ClientInfo::default();
    let repo = AuthenticationLogRepository::new(db);
    repo.create(AuthenticationLogParams::success(AuthEvent::Login, 1, &client))
        .await?;
    repo.create(AuthenticationLogParams::success(AuthEvent::Authentication, 1, &client))
        .await?;
    repo.create(AuthenticationLogParams::success(AuthEvent::Login, 2, &client))
        .await?;

    let (entries, total) = repo.get_paginated(0, 10, Some(1)).await?;
    assert_eq!(total, 2);
    assert!(entries.iter().all(|e| e.user_id == Some(1)));

    let (_, total) = repo.get_paginated(0, 10, None).await?;
    assert_eq!(total, 3);

    Ok(())
}
