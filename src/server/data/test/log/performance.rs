use super::*;

/// Tests performance entries are listed newest first.
///
/// Expected: Ok with the later entry first
#[tokio::test]
async fn lists_newest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_log_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PerformanceLogRepository::new(db);
    for operation in ["GET /api/v1/books", "GET /api/v1/authors"] {
        repo.create(PerformanceLogParams {
            component: "api".to_string(),
            operation: operation.to_string(),
            duration_ms: 1500,
            endpoint: None,
            user_id: None,
            admin_id: None,
            details: None,
        })
        .await?;
    }

    let (entries, total) = repo.get_paginated(0, 10).await?;

    assert_eq!(total, 2);
    assert_eq!(entries[0].operation, "GET /api/v1/authors");
    assert_eq!(entries[1].duration_ms, 1500);

    Ok(())
}
