//! Request and response DTOs for the HTTP API.
//!
//! These types define the JSON wire format. Request DTOs derive `validator::Validate`
//! and are checked before any service runs; every DTO derives `utoipa::ToSchema` for the
//! OpenAPI document.

pub mod api;
pub mod auth;
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
pub mod search;
pub mod upload;
pub mod user;
