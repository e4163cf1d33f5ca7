use super::*;

async fn book_count(db: &DatabaseConnection) -> Result<u64, DbErr> {
    entity::prelude::Book::find().count(db).await
}

/// Tests creating a book without a token.
///
/// Expected: 401 and no book row
#[tokio::test]
async fn create_requires_token() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_author(db).await?;
    let category = factory::create_category(db).await?;
    let body = json!({ "title": "Dune", "author_id": author.id, "category_id": category.id });

    let (status, _) = send(db, request("POST", "/api/v1/books", None, Some(body))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(book_count(db).await?, 0);

    Ok(())
}

/// Tests creating a book as a regular user.
///
/// Expected: 403 and no book row
#[tokio::test]
async fn create_requires_admin() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let author = factory::create_author(db).await?;
    let category = factory::create_category(db).await?;
    let body = json!({ "title": "Dune", "author_id": author.id, "category_id": category.id });

    let (status, _) = send(
        db,
        request("POST", "/api/v1/books", Some(&token_for(&user)), Some(body)),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(book_count(db).await?, 0);

    Ok(())
}

/// Tests an admin request missing the title.
///
/// Expected: 422 with field errors and no book row
#[tokio::test]
async fn create_rejects_missing_title() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_admin(db).await?;
    let author = factory::create_author(db).await?;
    let category = factory::create_category(db).await?;
    let body = json!({ "author_id": author.id, "category_id": category.id });

    let (status, json) = send(
        db,
        request("POST", "/api/v1/books", Some(&token_for(&admin)), Some(body)),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json["errors"].is_array());
    assert_eq!(book_count(db).await?, 0);

    Ok(())
}

/// Tests an admin creating a valid book.
///
/// Expected: 201 with the book, one row and one admin activity entry
#[tokio::test]
async fn admin_creates_book() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_admin(db).await?;
    let author = factory::create_author(db).await?;
    let category = factory::create_category(db).await?;
    let body = json!({
        "title": "Dune",
        "author_id": author.id,
        "category_id": category.id,
        "pages": 412,
    });

    let (status, json) = send(
        db,
        request("POST", "/api/v1/books", Some(&token_for(&admin)), Some(body)),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["title"], "Dune");
    assert_eq!(book_count(db).await?, 1);
    assert_eq!(
        entity::prelude::AdminActivityLog::find().count(db).await?,
        1
    );

    Ok(())
}

/// Tests anonymous listings hide inactive books.
///
/// Expected: 200 with only the active book counted
#[tokio::test]
async fn anonymous_listing_hides_inactive() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_author(db).await?;
    let category = factory::create_category(db).await?;
    factory::create_book(db, author.id, category.id).await?;
    factory::book::BookFactory::new(db, author.id, category.id)
        .active(false)
        .build()
        .await?;

    let (status, json) = send(db, request("GET", "/api/v1/books", None, None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 1);
    assert_eq!(json["items"].as_array().map(Vec::len), Some(1));

    Ok(())
}
