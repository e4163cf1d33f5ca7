//! Server-side API backend and business logic.
//!
//! This module contains the complete backend: API endpoints, business logic, data
//! access and infrastructure services. The backend uses Axum as the web framework and
//! SeaORM for database operations.
//!
//! # Architecture
//!
//! The server follows a layered architecture:
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers, access guards and DTO conversion
//! - **Service Layer** (`service/`) - Business rules, logging and calls to storage and email
//! - **Data Layer** (`data/`) - Database operations and entity-to-domain model conversion
//! - **Model Layer** (`model/`) - Domain models and operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Request logging, validation and bearer token guards
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment profiles and overrides
//! - **State** (`state`) - Shared application state (DB, config, storage, email)
//! - **Startup** (`startup`) - Tracing, database, HTTP client and service initialization
//! - **Router** (`router`) - Route table and OpenAPI document
//!
//! # Request Flow
//!
//! 1. **Router** matches the request; the request log layer starts its timer
//! 2. **Controller** extractors authenticate the caller and validate the body
//! 3. **Service** executes business logic and writes activity logs
//! 4. **Data** queries the database and converts entities to domain models
//! 5. **Controller** converts the domain model to a DTO
//! 6. The request log layer records the api request and, when slow, a performance entry

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
