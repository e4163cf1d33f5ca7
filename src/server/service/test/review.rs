use crate::server::{
    error::{auth::AuthError, AppError},
    model::{
        log::ClientInfo,
        review::{CreateReviewParams, UpdateReviewParams},
        user::User,
    },
    service::review::ReviewService,
};
use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

fn params(user_id: i32, book_id: i32, rating: i32) -> CreateReviewParams {
    CreateReviewParams {
        user_id,
        book_id,
        rating,
        title: None,
        content: "Worth the time.".to_string(),
        contains_spoilers: false,
    }
}

/// Tests a reader can only review a book once.
///
/// Expected: Err(Conflict) on the second review, one review row
#[tokio::test]
async fn second_review_conflicts() -> Result<(), DbErr> {
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
    let service = ReviewService::new(db);

    service
        .create(&user, params(user.id, book.id, 4), &client)
        .await
        .unwrap();
    let result = service
        .create(&user, params(user.id, book.id, 2), &client)
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert_eq!(entity::prelude::Review::find().count(db).await?, 1);

    Ok(())
}

/// Tests only the author may edit a review, admins included.
///
/// Expected: AccessDenied for another reader and for an admin, Ok for the author
#[tokio::test]
async fn only_author_updates() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_reader_tables()
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let author = User::from_entity(factory::create_user(db).await?);
    let other = User::from_entity(factory::create_user(db).await?);
    let admin = User::from_entity(factory::create_admin(db).await?);
    let (_, _, book) = factory::helpers::create_book_with_dependencies(db).await?;
    let review = factory::create_review(db, author.id, book.id, 3).await?;

    let client = ClientInfo::default();
    let service = ReviewService::new(db);
    let patch = || UpdateReviewParams {
        rating: Some(5),
        ..Default::default()
    };

    for intruder in [&other, &admin] {
        let result = service.update(intruder, review.id, patch(), &client).await;
        assert!(matches!(
            result,
            Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
        ));
    }

    let updated = service
        .update(&author, review.id, patch(), &client)
        .await
        .unwrap();
    assert_eq!(updated.rating, 5);

    Ok(())
}

/// Tests a review may be deleted by an admin but not by another reader.
///
/// Expected: AccessDenied for another reader, Ok for the admin, no review rows left
#[tokio::test]
async fn admin_may_delete() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_reader_tables()
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let author = User::from_entity(factory::create_user(db).await?);
    let other = User::from_entity(factory::create_user(db).await?);
    let admin = User::from_entity(factory::create_admin(db).await?);
    let (_, _, book) = factory::helpers::create_book_with_dependencies(db).await?;
    let review = factory::create_review(db, author.id, book.id, 3).await?;

    let client = ClientInfo::default();
    let service = ReviewService::new(db);

    assert!(matches!(
        service.delete(&other, review.id, &client).await,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    service.delete(&admin, review.id, &client).await.unwrap();

    assert_eq!(entity::prelude::Review::find().count(db).await?, 0);

    Ok(())
}

/// Tests the rating summary averages every review of the book.
///
/// Expected: average 3.0 over two reviews
#[tokio::test]
async fn rating_averages_reviews() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_reader_tables()
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::create_user(db).await?;
    let second = factory::create_user(db).await?;
    let (_, _, book) = factory::helpers::create_book_with_dependencies(db).await?;
    factory::create_review(db, first.id, book.id, 2).await?;
    factory::create_review(db, second.id, book.id, 4).await?;

    let rating = ReviewService::new(db).get_rating(book.id).await.unwrap();

    assert_eq!(rating.review_count, 2);
    assert_eq!(rating.average_rating, Some(3.0));

    Ok(())
}
