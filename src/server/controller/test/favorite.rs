use super::*;

/// Tests toggling a favorite twice over HTTP.
///
/// Expected: `is_favorite` true then false, and the status endpoint agrees
#[tokio::test]
async fn toggle_twice_restores_state() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_reader_tables()
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let (_, _, book) = factory::helpers::create_book_with_dependencies(db).await?;
    let token = token_for(&user);
    let toggle = format!("/api/v1/favorites/{}/toggle", book.id);
    let status_uri = format!("/api/v1/favorites/{}/status", book.id);

    let (status, first) = send(db, request("POST", &toggle, Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["is_favorite"], true);

    let (_, second) = send(db, request("POST", &toggle, Some(&token), None)).await;
    assert_eq!(second["is_favorite"], false);

    let (_, current) = send(db, request("GET", &status_uri, Some(&token), None)).await;
    assert_eq!(current["is_favorite"], false);

    assert_eq!(entity::prelude::Favorite::find().count(db).await?, 0);

    Ok(())
}

/// Tests favorites require a signed-in user.
///
/// Expected: 401 and no favorite row
#[tokio::test]
async fn toggle_requires_token() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_reader_tables()
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, book) = factory::helpers::create_book_with_dependencies(db).await?;
    let uri = format!("/api/v1/favorites/{}/toggle", book.id);

    let (status, _) = send(db, request("POST", &uri, None, None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(entity::prelude::Favorite::find().count(db).await?, 0);

    Ok(())
}
