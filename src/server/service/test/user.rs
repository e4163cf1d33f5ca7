use crate::server::{
    error::AppError,
    model::{log::ClientInfo, user::User},
    service::user::UserService,
};
use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

/// Tests an admin cannot delete their own account.
///
/// Expected: Err(BadRequest), the account still exists and nothing is audited
#[tokio::test]
async fn rejects_self_delete() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?);

    let result = UserService::new(db)
        .delete(&admin, admin.id, &ClientInfo::default())
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert_eq!(entity::prelude::User::find().count(db).await?, 1);
    assert_eq!(entity::prelude::AdminActivityLog::find().count(db).await?, 0);

    Ok(())
}

/// Tests deleting another account removes it and writes an audit row.
///
/// Expected: Ok, user gone, one admin activity row with action `delete`
#[tokio::test]
async fn deletes_other_account_with_audit() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?);
    let target = factory::create_user(db).await?;

    UserService::new(db)
        .delete(&admin, target.id, &ClientInfo::default())
        .await
        .unwrap();

    assert!(entity::prelude::User::find_by_id(target.id)
        .one(db)
        .await?
        .is_none());

    let audit = entity::prelude::AdminActivityLog::find().all(db).await?;
    assert_eq!(audit.len(), 1);
    assert_eq!(audit[0].admin_id, admin.id);
    assert_eq!(audit[0].action, "delete");
    assert_eq!(audit[0].resource_type, "user");
    assert_eq!(audit[0].resource_id, Some(target.id.to_string()));
    assert!(audit[0].before_state.is_some());

    Ok(())
}

/// Tests deleting an account that does not exist.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn missing_account_is_not_found() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?);
    let result = UserService::new(db)
        .delete(&admin, 9999, &ClientInfo::default())
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
