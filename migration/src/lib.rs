pub use sea_orm_migration::prelude::*;

mod m20250701_000001_create_user_table;
mod m20250701_000002_create_author_table;
mod m20250701_000003_create_category_table;
mod m20250701_000004_create_book_table;
mod m20250701_000005_create_chapter_table;
mod m20250701_000006_create_review_table;
mod m20250701_000007_create_favorite_table;
mod m20250701_000008_create_reading_list_table;
mod m20250701_000009_create_reading_list_item_table;
mod m20250701_000010_create_reading_progress_table;
mod m20250701_000011_create_reading_session_table;
mod m20250701_000012_create_authentication_log_table;
mod m20250701_000013_create_api_request_log_table;
mod m20250701_000014_create_performance_log_table;
mod m20250701_000015_create_user_activity_log_table;
mod m20250701_000016_create_admin_activity_log_table;
mod m20250701_000017_create_search_log_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250701_000001_create_user_table::Migration),
            Box::new(m20250701_000002_create_author_table::Migration),
            Box::new(m20250701_000003_create_category_table::Migration),
            Box::new(m20250701_000004_create_book_table::Migration),
            Box::new(m20250701_000005_create_chapter_table::Migration),
            Box::new(m20250701_000006_create_review_table::Migration),
            Box::new(m20250701_000007_create_favorite_table::Migration),
            Box::new(m20250701_000008_create_reading_list_table::Migration),
            Box::new(m20250701_000009_create_reading_list_item_table::Migration),
            Box::new(m20250701_000010_create_reading_progress_table::Migration),
            Box::new(m20250701_000011_create_reading_session_table::Migration),
            Box::new(m20250701_000012_create_authentication_log_table::Migration),
            Box::new(m20250701_000013_create_api_request_log_table::Migration),
            Box::new(m20250701_000014_create_performance_log_table::Migration),
            Box::new(m20250701_000015_create_user_activity_log_table::Migration),
            Box::new(m20250701_000016_create_admin_activity_log_table::Migration),
            Box::new(m20250701_000017_create_search_log_table::Migration),
        ]
    }
}
