use crate::server::{
    error::AppError,
    model::{log::ClientInfo, user::User},
    service::favorite::FavoriteService,
};
use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

/// Tests toggling twice returns the book to its original favorite state.
///
/// Expected: true then false, with no favorite rows left and two activity rows
#[tokio::test]
async fn toggle_twice_restores_state() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_reader_tables()
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = User::from_entity(factory::create_user(db).await?);
    let (_, _, book) = factory::helpers::create_book_with_dependencies(db).await?;
    let client = ClientInfo::default();
    let service = FavoriteService::new(db);

    assert!(!service.is_favorite(&user, book.id).await.unwrap());

    assert!(service.toggle(&user, book.id, &client).await.unwrap());
    assert!(service.is_favorite(&user, book.id).await.unwrap());

    assert!(!service.toggle(&user, book.id, &client).await.unwrap());
    assert!(!service.is_favorite(&user, book.id).await.unwrap());

    assert_eq!(entity::prelude::Favorite::find().count(db).await?, 0);
    assert_eq!(entity::prelude::UserActivityLog::find().count(db).await?, 2);

    Ok(())
}

/// Tests toggling starts from an existing favorite.
///
/// Expected: false then true, ending with the favorite present again
#[tokio::test]
async fn toggle_from_favorite() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_reader_tables()
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = User::from_entity(factory::create_user(db).await?);
    let (_, _, book) = factory::helpers::create_book_with_dependencies(db).await?;
    factory::create_favorite(db, user.id, book.id).await?;
    let client = ClientInfo::default();
    let service = FavoriteService::new(db);

    assert!(!service.toggle(&user, book.id, &client).await.unwrap());
    assert!(service.toggle(&user, book.id, &client).await.unwrap());
    assert_eq!(entity::prelude::Favorite::find().count(db).await?, 1);

    Ok(())
}

/// Tests adding a duplicate favorite and favoriting a missing book.
///
/// Expected: Err(Conflict) and Err(NotFound)
#[tokio::test]
async fn add_rejects_duplicate_and_missing_book() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_reader_tables()
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = User::from_entity(factory::create_user(db).await?);
    let (_, _, book) = factory::helpers::create_book_with_dependencies(db).await?;
    let client = ClientInfo::default();
    let service = FavoriteService::new(db);

    service.add(&user, book.id, &client).await.unwrap();

    let duplicate = service.add(&user, book.id, &client).await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));

    let missing = service.add(&user, 9999, &client).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    let removed = service.remove(&user, 9999, &client).await;
    assert!(matches!(removed, Err(AppError::NotFound(_))));

    Ok(())
}
