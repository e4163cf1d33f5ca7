use crate::{
    model::category::CreateCategoryDto,
    server::{
        error::AppError,
        model::{category::CreateCategoryParams, log::ClientInfo, user::User},
        service::category::CategoryService,
    },
};
use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

fn params(name: &str, is_active: bool) -> CreateCategoryParams {
    CreateCategoryParams::from_dto(CreateCategoryDto {
        name: name.to_string(),
        description: None,
        is_active: Some(is_active),
    })
}

/// Tests a category's slug is derived from its name and finds it again.
///
/// Expected: slug `science-fiction`, lookup by slug returns the same category and one
/// admin log row
#[tokio::test]
async fn derives_slug_and_finds_by_it() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?);
    let service = CategoryService::new(db);

    let created = service
        .create(&admin, params("  Science Fiction ", true), &ClientInfo::default())
        .await
        .unwrap();

    assert_eq!(created.name, "Science Fiction");
    assert_eq!(created.slug, "science-fiction");

    let found = service.get_by_slug("science-fiction", false).await.unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(entity::prelude::AdminActivityLog::find().count(db).await?, 1);

    Ok(())
}

/// Tests a name that slugifies to an existing slug is refused.
///
/// Expected: Err(Conflict) for "science fiction!" after "Science Fiction"
#[tokio::test]
async fn duplicate_slug_conflicts() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?);
    let client = ClientInfo::default();
    let service = CategoryService::new(db);

    service
        .create(&admin, params("Science Fiction", true), &client)
        .await
        .unwrap();
    let result = service
        .create(&admin, params("science fiction!", true), &client)
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert_eq!(entity::prelude::Category::find().count(db).await?, 1);

    Ok(())
}

/// Tests an inactive category is only visible by slug to admins.
///
/// Expected: NotFound for the public lookup, Ok for the admin lookup
#[tokio::test]
async fn inactive_slug_hidden_from_public() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?);
    let service = CategoryService::new(db);
    service
        .create(&admin, params("Poetry", false), &ClientInfo::default())
        .await
        .unwrap();

    assert!(matches!(
        service.get_by_slug("poetry", false).await,
        Err(AppError::NotFound(_))
    ));
    assert!(service.get_by_slug("poetry", true).await.is_ok());

    Ok(())
}
