use super::*;

/// Tests the health endpoint reports a reachable database.
///
/// Expected: 200 with status `healthy` and database `connected`
#[tokio::test]
async fn reports_healthy() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_log_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (status, body) = send(db, request("GET", "/health", None, None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
    assert_eq!(body["environment"], "development");

    assert_eq!(entity::prelude::ApiRequestLog::find().count(db).await?, 0);

    Ok(())
}
