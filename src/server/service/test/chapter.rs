use crate::server::{
    error::AppError,
    model::{
        chapter::{CreateChapterParams, UpdateChapterParams},
        log::ClientInfo,
        user::User,
    },
    service::chapter::ChapterService,
};
use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

fn params(book_id: i32, chapter_number: i32) -> CreateChapterParams {
    CreateChapterParams {
        book_id,
        title: format!("Chapter {chapter_number}"),
        content: None,
        chapter_number,
        image_url: None,
        is_published: true,
    }
}

/// Tests a second chapter with the same number in one book is refused.
///
/// Expected: Err(Conflict), one chapter row and one admin log from the first create
#[tokio::test]
async fn duplicate_number_conflicts() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?);
    let (_, _, book) = factory::helpers::create_book_with_dependencies(db).await?;
    let client = ClientInfo::default();
    let service = ChapterService::new(db);

    service.create(&admin, params(book.id, 1), &client).await.unwrap();
    let result = service.create(&admin, params(book.id, 1), &client).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert_eq!(entity::prelude::Chapter::find().count(db).await?, 1);
    assert_eq!(entity::prelude::AdminActivityLog::find().count(db).await?, 1);

    Ok(())
}

/// Tests the same chapter number is free in a different book.
///
/// Expected: Ok for chapter 1 of a second book
#[tokio::test]
async fn number_is_scoped_to_book() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?);
    let (author, category, first) = factory::helpers::create_book_with_dependencies(db).await?;
    let second = factory::create_book(db, author.id, category.id).await?;
    let client = ClientInfo::default();
    let service = ChapterService::new(db);

    service.create(&admin, params(first.id, 1), &client).await.unwrap();
    let result = service.create(&admin, params(second.id, 1), &client).await;

    assert!(result.is_ok());

    Ok(())
}

/// Tests the public view hides drafts and deactivated chapters.
///
/// Expected: public list holds only the published active chapter, admin view holds all
/// three, and a draft is NotFound by id for the public
#[tokio::test]
async fn public_view_hides_drafts_and_inactive() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?);
    let (_, _, book) = factory::helpers::create_book_with_dependencies(db).await?;

    let visible = factory::chapter::ChapterFactory::new(db, book.id, 1)
        .published(true)
        .build()
        .await?;
    let draft = factory::chapter::ChapterFactory::new(db, book.id, 2)
        .published(false)
        .build()
        .await?;
    let retired = factory::chapter::ChapterFactory::new(db, book.id, 3)
        .published(true)
        .build()
        .await?;

    let service = ChapterService::new(db);
    service
        .update(
            &admin,
            retired.id,
            UpdateChapterParams {
                is_active: Some(false),
                ..Default::default()
            },
            &ClientInfo::default(),
        )
        .await
        .unwrap();

    let public = service.get_by_book(book.id, false).await.unwrap();
    let ids: Vec<i32> = public.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![visible.id]);

    let all = service.get_by_book(book.id, true).await.unwrap();
    assert_eq!(all.len(), 3);

    assert!(matches!(
        service.get_by_id(draft.id, false).await,
        Err(AppError::NotFound(_))
    ));
    assert!(service.get_by_id(draft.id, true).await.is_ok());

    Ok(())
}
