use super::*;

/// Tests creating a book resolves author and category names.
///
/// Expected: Ok with names filled in from the referenced rows
#[tokio::test]
async fn creates_book_with_names() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_catalog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_author(db).await?;
    let category = factory::create_category(db).await?;

    let repo = BookRepository::new(db);
    let book = repo.create(params("Dune", author.id, category.id)).await?;

    assert_eq!(book.title, "Dune");
    assert_eq!(book.author_name.as_deref(), Some(author.name.as_str()));
    assert_eq!(book.category_name.as_deref(), Some(category.name.as_str()));
    assert!(book.is_active);

    Ok(())
}

/// Tests a second book with the same ISBN is rejected by the unique index.
///
/// Expected: Err on the second insert, one row stored
#[tokio::test]
async fn rejects_duplicate_isbn() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_catalog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_author(db).await?;
    let category = factory::create_category(db).await?;
    let repo = BookRepository::new(db);

    let mut first = params("First", author.id, category.id);
    first.isbn = Some("9780441013593".to_string());
    repo.create(first).await?;

    let mut second = params("Second", author.id, category.id);
    second.isbn = Some("9780441013593".to_string());
    let result = repo.create(second).await;

    assert!(result.is_err());
    assert_eq!(entity::prelude::Book::find().count(db).await?, 1);

    let found = repo.find_by_isbn("9780441013593").await?;
    assert_eq!(found.map(|b| b.title), Some("First".to_string()));

    Ok(())
}
