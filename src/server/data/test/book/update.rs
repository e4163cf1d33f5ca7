use super::*;

/// Tests a patch changes only the given columns and can clear optional ones.
///
/// Expected: Ok(Some) with the new title, cleared description and unchanged pages
#[tokio::test]
async fn applies_partial_patch() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_catalog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, book) = factory::helpers::create_book_with_dependencies(db).await?;

    let repo = BookRepository::new(db);
    let updated = repo
        .update(
            book.id,
            UpdateBookParams {
                title: Some("Renamed".to_string()),
                description: Some(None),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.description, None);
    assert_eq!(updated.pages, book.pages);
    assert!(updated.updated_at >= book.updated_at);

    Ok(())
}

/// Tests updating a missing book.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_book() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_catalog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = BookRepository::new(db)
        .update(999, UpdateBookParams::default())
        .await?;

    assert!(result.is_none());

    Ok(())
}
