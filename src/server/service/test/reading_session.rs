use crate::server::{
    error::AppError,
    model::{log::ClientInfo, reading_session::StartSessionParams, user::User},
    service::reading_session::ReadingSessionService,
};
use sea_orm::{ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter};
use test_utils::{builder::TestBuilder, factory};

fn start(user_id: i32, book_id: i32) -> StartSessionParams {
    StartSessionParams {
        user_id,
        book_id,
        chapter_id: None,
        start_page: Some(10),
    }
}

/// Tests starting a session ends the one the user still has open.
///
/// Expected: one active session afterwards, and a performance row per start
#[tokio::test]
async fn start_ends_previous_session() -> Result<(), DbErr> {
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
    let service = ReadingSessionService::new(db);

    let first = service
        .start(&user, start(user.id, book.id), &client)
        .await
        .unwrap();
    let second = service
        .start(&user, start(user.id, book.id), &client)
        .await
        .unwrap();

    assert!(second.is_active);

    let first = entity::prelude::ReadingSession::find_by_id(first.id)
        .one(db)
        .await?
        .unwrap();
    assert!(!first.is_active);
    assert!(first.end_time.is_some());

    let active = entity::prelude::ReadingSession::find()
        .filter(entity::reading_session::Column::IsActive.eq(true))
        .count(db)
        .await?;
    assert_eq!(active, 1);

    let timings = entity::prelude::PerformanceLog::find()
        .filter(entity::performance_log::Column::Component.eq("reading_session_service"))
        .count(db)
        .await?;
    assert_eq!(timings, 2);

    Ok(())
}

/// Tests ending a session records pages read and rejects a second end.
///
/// Expected: Ok with pages_read = end - start, then Err(BadRequest)
#[tokio::test]
async fn end_computes_pages_and_rejects_repeat() -> Result<(), DbErr> {
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
    let service = ReadingSessionService::new(db);

    let session = service
        .start(&user, start(user.id, book.id), &client)
        .await
        .unwrap();
    let ended = service
        .end(&user, session.id, Some(35), None, &client)
        .await
        .unwrap();

    assert!(!ended.is_active);
    assert_eq!(ended.end_page, Some(35));
    assert_eq!(ended.pages_read, Some(25));

    let again = service.end(&user, session.id, Some(40), None, &client).await;
    assert!(matches!(again, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests another user cannot end someone else's session.
///
/// Expected: Err(NotFound) and the session stays active
#[tokio::test]
async fn end_hides_foreign_sessions() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_reader_tables()
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = User::from_entity(factory::create_user(db).await?);
    let other = User::from_entity(factory::create_user(db).await?);
    let (_, _, book) = factory::helpers::create_book_with_dependencies(db).await?;
    let client = ClientInfo::default();
    let service = ReadingSessionService::new(db);

    let session = service
        .start(&owner, start(owner.id, book.id), &client)
        .await
        .unwrap();
    let result = service.end(&other, session.id, None, None, &client).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
    let stored = entity::prelude::ReadingSession::find_by_id(session.id)
        .one(db)
        .await?
        .unwrap();
    assert!(stored.is_active);

    Ok(())
}
