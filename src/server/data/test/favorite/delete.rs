use super::*;

/// Tests deleting an existing favorite reports it and removes the row.
///
/// Expected: Ok(true), then find returns None
#[tokio::test]
async fn removes_existing_favorite() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_reader_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let (_, _, book) = factory::helpers::create_book_with_dependencies(db).await?;
    factory::create_favorite(db, user.id, book.id).await?;

    let repo = FavoriteRepository::new(db);
    assert!(repo.delete(user.id, book.id).await?);
    assert!(repo.find(user.id, book.id).await?.is_none());

    Ok(())
}

/// Tests deleting a book that was never favorited.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_when_absent() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_reader_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let (_, _, book) = factory::helpers::create_book_with_dependencies(db).await?;

    let repo = FavoriteRepository::new(db);
    assert!(!repo.delete(user.id, book.id).await?);

    Ok(())
}
