use super::*;

/// Tests reordering rewrites every index to the position in the given sequence.
///
/// Expected: Ok, with items returned in the new order and indexes 0..n
#[tokio::test]
async fn rewrites_order_indexes() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_reader_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let author = factory::create_author(db).await?;
    let category = factory::create_category(db).await?;
    let list = factory::create_reading_list(db, user.id).await?;

    let mut book_ids = Vec::new();
    for index in 0..3 {
        let book = factory::create_book(db, author.id, category.id).await?;
        factory::reading_list::add_reading_list_item(db, list.id, book.id, index).await?;
        book_ids.push(book.id);
    }

    let reversed: Vec<i32> = book_ids.iter().rev().copied().collect();
    let repo = ReadingListRepository::new(db);
    repo.reorder(list.id, &reversed).await?;

    let stored = repo.find_by_id(list.id).await?.unwrap();
    let ordered: Vec<i32> = stored.items.iter().map(|i| i.book_id).collect();
    let indexes: Vec<i32> = stored.items.iter().map(|i| i.order_index).collect();

    assert_eq!(ordered, reversed);
    assert_eq!(indexes, vec![0, 1, 2]);

    Ok(())
}

/// Tests a partial reorder moves the listed books first and keeps the rest in order.
///
/// Expected: Ok, with [3] applied to [1, 2, 3] giving [3, 1, 2] at indexes 0..3
#[tokio::test]
async fn partial_reorder_keeps_indexes_distinct() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_reader_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let author = factory::create_author(db).await?;
    let category = factory::create_category(db).await?;
    let list = factory::create_reading_list(db, user.id).await?;

    let mut book_ids = Vec::new();
    for index in 0..3 {
        let book = factory::create_book(db, author.id, category.id).await?;
        factory::reading_list::add_reading_list_item(db, list.id, book.id, index).await?;
        book_ids.push(book.id);
    }

    let repo = ReadingListRepository::new(db);
    repo.reorder(list.id, &[book_ids[2]]).await?;

    let stored = repo.find_by_id(list.id).await?.unwrap();
    let ordered: Vec<(i32, i32)> = stored
        .items
        .iter()
        .map(|i| (i.book_id, i.order_index))
        .collect();

    assert_eq!(
        ordered,
        vec![(book_ids[2], 0), (book_ids[0], 1), (book_ids[1], 2)]
    );

    Ok(())
}
