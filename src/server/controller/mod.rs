//! HTTP request handlers.
//!
//! Each handler extracts its access guard, converts DTOs into domain params, calls the
//! matching service and converts the result back into a DTO. Handlers are annotated with
//! `utoipa::path` and collected into the OpenAPI document in `router`.

pub mod auth;
pub mod author;
pub mod book;
pub mod category;
pub mod chapter;
pub mod favorite;
pub mod health;
pub mod log;
pub mod reading_list;
pub mod reading_progress;
pub mod reading_session;
pub mod review;
pub mod search;
pub mod upload;
pub mod user;

#[cfg(test)]
mod test;
