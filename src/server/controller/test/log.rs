use super::*;

/// Tests admins can list a log table and unknown kinds are 404.
///
/// Expected: 200 with at least the admin's own authentication entry, then 404
#[tokio::test]
async fn admin_lists_logs() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_admin(db).await?;
    let token = token_for(&admin);

    let (status, json) = send(
        db,
        request("GET", "/api/v1/admin/logs/authentication", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["total"].as_u64().is_some_and(|t| t >= 1));

    let (status, _) = send(
        db,
        request("GET", "/api/v1/admin/logs/bogus", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}

/// Tests regular users cannot read logs.
///
/// Expected: 403
#[tokio::test]
async fn regular_user_is_forbidden() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;

    let (status, _) = send(
        db,
        request(
            "GET",
            "/api/v1/admin/logs/performance",
            Some(&token_for(&user)),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);

    Ok(())
}
