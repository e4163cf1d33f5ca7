use crate::server::{
    error::AppError,
    model::{
        log::ClientInfo,
        reading_progress::{ProgressUpdate, ReadingStatus},
        user::User,
    },
    service::reading_progress::ReadingProgressService,
};
use sea_orm::{ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter};
use test_utils::{builder::TestBuilder, factory};

/// Tests upserting creates a record that takes its page count from the book.
///
/// Expected: Ok with total pages from the book, 25% read and status reading
#[tokio::test]
async fn upsert_creates_from_book_pages() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_reader_tables()
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = User::from_entity(factory::create_user(db).await?);
    let author = factory::create_author(db).await?;
    let category = factory::create_category(db).await?;
    let book = factory::book::BookFactory::new(db, author.id, category.id)
        .pages(Some(200))
        .build()
        .await?;

    let progress = ReadingProgressService::new(db)
        .upsert(
            &user,
            book.id,
            ProgressUpdate {
                current_page: Some(50),
                ..Default::default()
            },
            &ClientInfo::default(),
        )
        .await
        .unwrap();

    assert_eq!(progress.total_pages, Some(200));
    assert_eq!(progress.current_page, 50);
    assert_eq!(progress.progress_percentage, 25.0);
    assert_eq!(progress.status, ReadingStatus::Reading);
    assert!(progress.started_at.is_some());
    assert!(!progress.is_completed);

    Ok(())
}

/// Tests reaching the last page completes the book and logs the completion once.
///
/// Expected: Ok with 100%, status completed, and one BOOK_COMPLETED activity row
#[tokio::test]
async fn update_to_last_page_completes() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_reader_tables()
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = User::from_entity(factory::create_user(db).await?);
    let author = factory::create_author(db).await?;
    let category = factory::create_category(db).await?;
    let book = factory::book::BookFactory::new(db, author.id, category.id)
        .pages(Some(120))
        .build()
        .await?;

    let client = ClientInfo::default();
    let service = ReadingProgressService::new(db);
    service
        .upsert(&user, book.id, ProgressUpdate::default(), &client)
        .await
        .unwrap();

    let done = service
        .update(
            &user,
            book.id,
            ProgressUpdate {
                current_page: Some(120),
                ..Default::default()
            },
            &client,
        )
        .await
        .unwrap();

    assert!(done.is_completed);
    assert_eq!(done.status, ReadingStatus::Completed);
    assert_eq!(done.progress_percentage, 100.0);
    assert!(done.completed_at.is_some());

    service
        .update(
            &user,
            book.id,
            ProgressUpdate {
                notes: Some(Some("loved it".to_string())),
                ..Default::default()
            },
            &client,
        )
        .await
        .unwrap();

    let completions = entity::prelude::UserActivityLog::find()
        .filter(entity::user_activity_log::Column::ActivityType.eq("BOOK_COMPLETED"))
        .count(db)
        .await?;
    assert_eq!(completions, 1);

    Ok(())
}

/// Tests progress for a missing book or a book never started.
///
/// Expected: Err(NotFound) for both
#[tokio::test]
async fn missing_records_are_not_found() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_reader_tables()
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = User::from_entity(factory::create_user(db).await?);
    let (_, _, book) = factory::helpers::create_book_with_dependencies(db).await?;
    let service = ReadingProgressService::new(db);

    let upsert = service
        .upsert(&user, 9999, ProgressUpdate::default(), &ClientInfo::default())
        .await;
    assert!(matches!(upsert, Err(AppError::NotFound(_))));

    let get = service.get(&user, book.id).await;
    assert!(matches!(get, Err(AppError::NotFound(_))));

    Ok(())
}
