use super::*;

/// Tests listing returns only the user's favorites with their books attached.
///
/// Expected: Ok with one favorite carrying its book, other users' favorites excluded
#[tokio::test]
async fn lists_own_favorites_with_books() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_reader_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let (_, _, book) = factory::helpers::create_book_with_dependencies(db).await?;
    factory::create_favorite(db, user.id, book.id).await?;
    factory::create_favorite(db, other.id, book.id).await?;

    let repo = FavoriteRepository::new(db);
    let (favorites, total) = repo.get_by_user_paginated(user.id, 0, 10).await?;

    assert_eq!(total, 1);
    assert_eq!(favorites[0].user_id, user.id);
    let attached = favorites[0].book.as_ref().unwrap();
    assert_eq!(attached.id, book.id);
    assert_eq!(attached.title, book.title);

    assert_eq!(repo.count_for_book(book.id).await?, 2);

    Ok(())
}
