use super::*;

/// Tests items are appended with increasing order indexes and book titles.
///
/// Expected: Ok with order_index 0 then 1, and the list returns them in that order
#[tokio::test]
async fn appends_items_in_order() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_reader_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let author = factory::create_author(db).await?;
    let category = factory::create_category(db).await?;
    let first = factory::create_book(db, author.id, category.id).await?;
    let second = factory::create_book(db, author.id, category.id).await?;

    let repo = ReadingListRepository::new(db);
    let list = repo
        .create(CreateReadingListParams {
            user_id: user.id,
            name: "Summer".to_string(),
            description: None,
            is_public: false,
        })
        .await?;

    let a = repo.add_item(list.id, first.id, None).await?;
    let b = repo
        .add_item(list.id, second.id, Some("after the first".to_string()))
        .await?;

    assert_eq!(a.order_index, 0);
    assert_eq!(b.order_index, 1);
    assert_eq!(b.book_title.as_deref(), Some(second.title.as_str()));

    let stored = repo.find_by_id(list.id).await?.unwrap();
    let ids: Vec<i32> = stored.items.iter().map(|i| i.book_id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
    assert!(repo.contains_book(list.id, first.id).await?);

    Ok(())
}

/// Tests removing a listed book and then removing it again.
///
/// Expected: Ok(true) then Ok(false), and the book is no longer contained
#[tokio::test]
async fn removes_item_once() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_reader_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let (_, _, book) = factory::helpers::create_book_with_dependencies(db).await?;
    let list = factory::create_reading_list(db, user.id).await?;

    let repo = ReadingListRepository::new(db);
    repo.add_item(list.id, book.id, None).await?;

    assert!(repo.remove_item(list.id, book.id).await?);
    assert!(!repo.remove_item(list.id, book.id).await?);
    assert!(!repo.contains_book(list.id, book.id).await?);

    Ok(())
}
