//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations (CRUD) for each
//! domain in the application. Repositories use SeaORM entity models internally and return
//! domain models to maintain separation between the data layer and business logic layer.
//! All database queries, inserts, updates, and deletes are performed through these repositories.

pub mod author;
pub mod book;
pub mod category;
pub mod chapter;
pub mod favorite;
pub mod log;
pub mod reading_list;
pub mod reading_progress;
pub mod reading_session;
pub mod review;
pub mod text_match;
pub mod user;

#[cfg(test)]
mod test;
