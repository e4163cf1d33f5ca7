use super::*;

/// Tests the active-only filter hides inactive books and the total reflects it.
///
/// Expected: Ok with only the active book and total of 1
#[tokio::test]
async fn hides_inactive_books() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_catalog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_author(db).await?;
    let category = factory::create_category(db).await?;
    factory::book::BookFactory::new(db, author.id, category.id)
        .title("Visible")
        .build()
        .await?;
    factory::book::BookFactory::new(db, author.id, category.id)
        .title("Hidden")
        .active(false)
        .build()
        .await?;

    let repo = BookRepository::new(db);
    let filter = BookFilter {
        active_only: true,
        ..Default::default()
    };
    let (books, total) = repo.get_paginated(0, 10, &filter).await?;

    assert_eq!(total, 1);
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "Visible");

    let (all, total) = repo.get_paginated(0, 10, &BookFilter::default()).await?;
    assert_eq!(total, 2);
    assert_eq!(all.len(), 2);

    Ok(())
}

/// Tests filtering by category and by text.
///
/// Expected: Ok with only books matching every given filter
#[tokio::test]
async fn filters_by_category_and_text() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_catalog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_author(db).await?;
    let fiction = factory::create_category(db).await?;
    let science = factory::create_category(db).await?;
    factory::book::BookFactory::new(db, author.id, fiction.id)
        .title("The Rust Voyage")
        .build()
        .await?;
    factory::book::BookFactory::new(db, author.id, fiction.id)
        .title("Ocean Tales")
        .description("A story about rust on old ships")
        .build()
        .await?;
    factory::book::BookFactory::new(db, author.id, science.id)
        .title("Rust in Metals")
        .build()
        .await?;

    let repo = BookRepository::new(db);

    let filter = BookFilter {
        category_id: Some(fiction.id),
        ..Default::default()
    };
    let (_, total) = repo.get_paginated(0, 10, &filter).await?;
    assert_eq!(total, 2);

    let filter = BookFilter {
        category_id: Some(fiction.id),
        text: Some("Rust".to_string()),
        ..Default::default()
    };
    let (books, total) = repo.get_paginated(0, 10, &filter).await?;
    assert_eq!(total, 2);
    assert!(books.iter().all(|b| b.category_id == fiction.id));

    let filter = BookFilter {
        text: Some("Metals".to_string()),
        ..Default::default()
    };
    let (books, total) = repo.get_paginated(0, 10, &filter).await?;
    assert_eq!(total, 1);
    assert_eq!(books[0].category_id, science.id);

    Ok(())
}

/// Tests paging splits results and keeps the overall total.
///
/// Expected: Ok with pages of 2, 2 and 1 books and total 5 on each
#[tokio::test]
async fn paginates_results() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_catalog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_author(db).await?;
    let category = factory::create_category(db).await?;
    for _ in 0..5 {
        factory::create_book(db, author.id, category.id).await?;
    }

    let repo = BookRepository::new(db);
    let filter = BookFilter::default();

    let (first, total) = repo.get_paginated(0, 2, &filter).await?;
    let (second, _) = repo.get_paginated(1, 2, &filter).await?;
    let (third, _) = repo.get_paginated(2, 2, &filter).await?;

    assert_eq!(total, 5);
    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 2);
    assert_eq!(third.len(), 1);

    Ok(())
}
