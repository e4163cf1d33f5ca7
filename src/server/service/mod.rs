//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Implementing core business rules and validation
//! - **Orchestration**: Coordinating repository calls with storage and email
//! - **Domain Models**: Working with domain models rather than DTOs or entity models
//! - **Audit Logging**: Recording user and admin activity through `LogService`

pub mod auth;
pub mod author;
pub mod book;
pub mod category;
pub mod chapter;
pub mod email;
pub mod favorite;
pub mod log;
pub mod password;
pub mod reading_list;
pub mod reading_progress;
pub mod reading_session;
pub mod review;
pub mod search;
pub mod storage;
pub mod token;
pub mod upload;
pub mod user;

#[cfg(test)]
mod test;
