//! SeaORM entity models for the Libris database.
//!
//! One module per table. Catalog tables (authors, categories, books, chapters), reader
//! tables (favorites, reviews, reading lists, progress and sessions) and the six
//! append-only log tables written by the logging fan-out.

pub mod prelude;

pub mod admin_activity_log;
pub mod api_request_log;
pub mod authentication_log;
pub mod author;
pub mod book;
pub mod category;
pub mod chapter;
pub mod favorite;
pub mod performance_log;
pub mod reading_list;
pub mod reading_list_item;
pub mod reading_progress;
pub mod reading_session;
pub mod review;
pub mod search_log;
pub mod user;
pub mod user_activity_log;
