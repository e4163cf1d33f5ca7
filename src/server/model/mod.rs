//! Server-side domain models and parameter types.
//!
//! This module contains domain models used throughout the service layer, representing
//! business entities and operation parameters. Domain models are converted from entity
//! models at the repository boundary and transformed to DTOs at the controller boundary.

pub mod author;
pub mod book;
pub mod category;
pub mod chapter;
pub mod favorite;
pub mod log;
pub mod page;
pub mod reading_list;
pub mod reading_progress;
pub mod reading_session;
pub mod review;
pub mod search;
pub mod user;
