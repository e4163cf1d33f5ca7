use crate::server::{
    error::AppError,
    model::{book::BookFilter, page::PageParams},
    service::search::SearchService,
};
use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

/// Tests a blank query is a validation error and is not logged.
///
/// Expected: Err(Validation) for every search kind, zero search log rows
#[tokio::test]
async fn blank_query_is_rejected() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let service = SearchService::new(db);
    let params = PageParams {
        page: 0,
        per_page: 10,
    };

    let books = service
        .books("   ", BookFilter::default(), params, None)
        .await;
    let authors = service.authors("", 10, None).await;
    let all = service.all("\t", 10, None).await;

    assert!(matches!(books, Err(AppError::Validation(_))));
    assert!(matches!(authors, Err(AppError::Validation(_))));
    assert!(matches!(all, Err(AppError::Validation(_))));
    assert_eq!(entity::prelude::SearchLog::find().count(db).await?, 0);

    Ok(())
}

/// Tests book search skips inactive books and logs the result count.
///
/// Expected: Ok with the active match only, one search log with results_count 1
#[tokio::test]
async fn book_search_logs_results() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let author = factory::create_author(db).await?;
    let category = factory::create_category(db).await?;
    factory::book::BookFactory::new(db, author.id, category.id)
        .title("Gardens of the Moon")
        .build()
        .await?;
    factory::book::BookFactory::new(db, author.id, category.id)
        .title("Moon Draft")
        .active(false)
        .build()
        .await?;

    let page = SearchService::new(db)
        .books(
            " moon ",
            BookFilter::default(),
            PageParams {
                page: 0,
                per_page: 10,
            },
            Some(user.id),
        )
        .await
        .unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].title, "Gardens of the Moon");

    let logs = entity::prelude::SearchLog::find().all(db).await?;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].query, "moon");
    assert_eq!(logs[0].search_type, "books");
    assert_eq!(logs[0].results_count, 1);
    assert_eq!(logs[0].user_id, Some(user.id));

    Ok(())
}

/// Tests author search ignores case, including an accented initial.
///
/// Expected: "Émile Zola" found for lower, upper and as-stored queries; no match for "hugo"
#[tokio::test]
async fn author_search_ignores_case() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::author::AuthorFactory::new(db)
        .name("Émile Zola")
        .build()
        .await?;

    let service = SearchService::new(db);
    for query in ["Émile", "émile", "ÉMILE ZOLA", "zola"] {
        let authors = service.authors(query, 10, None).await.unwrap();
        assert_eq!(authors.len(), 1, "query {query:?}");
        assert_eq!(authors[0].name, "Émile Zola");
    }
    assert!(service.authors("hugo", 10, None).await.unwrap().is_empty());

    Ok(())
}

/// Tests book search matches a title typed in a different case.
///
/// Expected: "GARDENS" finds "Gardens of the Moon"
#[tokio::test]
async fn book_search_ignores_case() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_author(db).await?;
    let category = factory::create_category(db).await?;
    factory::book::BookFactory::new(db, author.id, category.id)
        .title("Gardens of the Moon")
        .build()
        .await?;

    let page = SearchService::new(db)
        .books(
            "GARDENS",
            BookFilter::default(),
            PageParams {
                page: 0,
                per_page: 10,
            },
            None,
        )
        .await
        .unwrap();

    assert_eq!(page.total, 1);

    Ok(())
}
