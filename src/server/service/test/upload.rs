use std::sync::{Arc, Mutex};

use axum::{extract::State, http::Method, http::StatusCode, http::Uri, routing::any, Router};
use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    config::StorageConfig,
    error::AppError,
    model::{log::ClientInfo, user::User},
    service::{
        storage::{StorageClient, UploadKind},
        upload::UploadService,
    },
};

type Calls = Arc<Mutex<Vec<String>>>;

/// Starts a local object store that accepts every write and records `METHOD path`.
async fn object_store() -> (StorageClient, Calls) {
    let calls: Calls = Arc::default();

    let app = Router::new()
        .route(
            "/storage/v1/object/{*path}",
            any(
                |State(calls): State<Calls>, method: Method, uri: Uri| async move {
                    calls.lock().unwrap().push(format!("{} {}", method, uri.path()));
                    StatusCode::OK
                },
            ),
        )
        .with_state(calls.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = StorageClient::new(
        reqwest::Client::new(),
        Some(StorageConfig {
            url: format!("http://{addr}"),
            service_key: "service-key".to_string(),
            bucket: "books".to_string(),
        }),
    );

    (client, calls)
}

/// Tests an accepted upload is stored under its folder and logged against the admin.
///
/// Expected: one PUT under `covers/`, one UPLOAD admin log naming the object key
#[tokio::test]
async fn upload_writes_admin_log() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?);
    let (storage, calls) = object_store().await;

    let stored = UploadService::new(db, &storage)
        .upload(
            &admin,
            UploadKind::Cover,
            Some("cover.png".to_string()),
            "image/png",
            vec![0u8; 64],
            &ClientInfo::default(),
        )
        .await
        .unwrap();

    assert!(stored.key.starts_with("covers/"));
    assert!(stored.key.ends_with(".png"));
    assert_eq!(stored.size, 64);

    let calls = calls.lock().unwrap().clone();
    assert_eq!(calls, vec![format!("PUT /storage/v1/object/books/{}", stored.key)]);

    let logs = entity::prelude::AdminActivityLog::find().all(db).await?;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].admin_id, admin.id);
    assert_eq!(logs[0].activity_type, "UPLOAD");
    assert_eq!(logs[0].resource_type, "covers");
    assert_eq!(logs[0].resource_id.as_deref(), Some(stored.key.as_str()));

    Ok(())
}

/// Tests a rejected file type never reaches storage and is not logged.
///
/// Expected: Err(StorageErr), no storage calls, no admin log rows
#[tokio::test]
async fn rejected_type_is_not_logged() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?);
    let (storage, calls) = object_store().await;

    let result = UploadService::new(db, &storage)
        .upload(
            &admin,
            UploadKind::Pdf,
            Some("notes.txt".to_string()),
            "text/plain",
            b"plain".to_vec(),
            &ClientInfo::default(),
        )
        .await;

    assert!(matches!(result, Err(AppError::StorageErr(_))));
    assert!(calls.lock().unwrap().is_empty());
    assert_eq!(entity::prelude::AdminActivityLog::find().count(db).await?, 0);

    Ok(())
}
